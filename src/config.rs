use std::env;

#[derive(Debug, Clone)]
pub struct VertexConfig {
    pub project_id: Option<String>,
    pub location: Option<String>,
    pub access_token: Option<String>,
    /// Base URL override for the prediction endpoint. When unset the
    /// regional `aiplatform.googleapis.com` host is derived from `location`.
    pub endpoint: Option<String>,
}

pub const DEFAULT_LOCATION: &str = "asia-northeast1";

impl Default for VertexConfig {
    fn default() -> Self {
        VertexConfig {
            project_id: None,
            location: None,
            access_token: None,
            endpoint: None,
        }
    }
}

impl VertexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let project_id = env::var("VERTEX_PROJECT_ID").ok();
        let location = env::var("VERTEX_LOCATION").ok();
        let access_token = env::var("VERTEX_ACCESS_TOKEN").ok();
        let endpoint = env::var("VERTEX_ENDPOINT").ok();

        VertexConfig {
            project_id,
            location,
            access_token,
            endpoint,
        }
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Location actually used for the call, falling back to the default
    /// region when none is configured.
    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub vertex: Option<VertexConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            vertex: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            port,
            vertex: Some(VertexConfig::from_env()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_vertex(mut self, config: VertexConfig) -> Self {
        self.vertex = Some(config);
        self
    }
}
