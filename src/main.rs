use imagen_canvas::{
    logger::{self, LogLevel, LoggerConfig},
    server, Config, ImageClient, ImageGeneration, VertexClient,
};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(LoggerConfig::development().with_level(LogLevel::Debug))?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    log::info!("🔍 Checking Vertex AI environment...");

    let config = Config::from_env();
    let vertex_config = config.vertex.clone().unwrap_or_default();

    if let Some(project) = &vertex_config.project_id {
        log::info!("VERTEX_PROJECT_ID: {}", project);
    } else {
        log::error!("❌ VERTEX_PROJECT_ID is not set");
    }

    log::info!("VERTEX_LOCATION: {}", vertex_config.location_or_default());

    // Token presence only, never the value.
    match &vertex_config.access_token {
        Some(token) => {
            log::info!("✅ Vertex AI access token found in environment");
            log::debug!("Access token length: {}", token.len());
        }
        None => {
            log::warn!("⚠️  No VERTEX_ACCESS_TOKEN in environment variables");
            log::error!("❌ This will likely cause authentication failures");
        }
    }

    log::info!("🔄 Creating Vertex AI client...");
    let client = match VertexClient::new(vertex_config) {
        Ok(client) => {
            log::info!("✅ Vertex AI client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Vertex AI client: {}", e);
            return Err(e.into());
        }
    };

    log::info!("🖼️  Available image generation models:");
    for model in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", model.id, model.name, model.provider);
    }

    let port = config.port.unwrap_or(server::DEFAULT_PORT);
    logger::log_startup_info("imagen-canvas", env!("CARGO_PKG_VERSION"), port);

    let backend: Arc<dyn ImageGeneration> = Arc::new(client.image().clone());
    server::run(config, backend).await?;

    Ok(())
}
