pub mod image_client;

use crate::{
    config::VertexConfig,
    error::{CanvasError, Result},
};

pub use image_client::ImageClient;

#[derive(Clone)]
pub struct VertexClient {
    image_client: ImageClient,
}

impl VertexClient {
    /// Builds the client from explicit configuration. Project id and access
    /// token must be present; the location falls back to the default region.
    pub fn new(config: VertexConfig) -> Result<Self> {
        let project_id = config
            .project_id
            .clone()
            .ok_or_else(|| CanvasError::ConfigError("Vertex project id is required".into()))?;
        let access_token = config
            .access_token
            .clone()
            .ok_or_else(|| CanvasError::ConfigError("Vertex access token is required".into()))?;
        let location = config.location_or_default().to_string();

        let http = reqwest::Client::new();

        Ok(Self {
            image_client: ImageClient::new(http, project_id, location, access_token, config.endpoint),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
