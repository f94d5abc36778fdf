use crate::{
    adapter::{self, ImageGeneration},
    config::Config,
    logger::Timer,
    models::{CanvasSubmission, GenerationRequest},
    vertex::ImageClient,
};
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("index.html");

pub const DEFAULT_PORT: u16 = 7860;

pub struct AppState {
    pub backend: Arc<dyn ImageGeneration>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Data URLs in the order the remote capability produced the images.
    pub images: Vec<String>,
    /// Empty on success.
    pub error: String,
}

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn models() -> impl Responder {
    HttpResponse::Ok().json(ImageClient::supported_models())
}

/// One submission, one remote call. Failures ride in the `error` field of a
/// 200 response; the form never sees an HTTP error for a failed generation.
async fn generate(
    state: web::Data<AppState>,
    submission: web::Json<CanvasSubmission>,
) -> impl Responder {
    let request = GenerationRequest::from_submission(&submission);

    log::info!("prompt: {}", request.prompt);
    log::info!("negative_prompt: {:?}", request.negative_prompt);

    let timer = Timer::new("image generation");
    let result = adapter::invoke(state.backend.as_ref(), &request).await;
    timer.stop();

    let (images, error) = result.into_parts();
    let images = images
        .iter()
        .map(|image| {
            format!(
                "data:{};base64,{}",
                image.mime_type,
                general_purpose::STANDARD.encode(&image.bytes)
            )
        })
        .collect();

    HttpResponse::Ok().json(GenerateResponse { images, error })
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health))
        .route("/api/models", web::get().to(models))
        .route("/api/generate", web::post().to(generate));
}

pub async fn run(config: Config, backend: Arc<dyn ImageGeneration>) -> std::io::Result<()> {
    let state = web::Data::new(AppState { backend });
    let port = config.port.unwrap_or(DEFAULT_PORT);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(("127.0.0.1", port))?
        .run()
        .await
}
