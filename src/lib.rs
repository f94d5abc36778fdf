pub mod adapter;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod server;
pub mod vertex;

pub use adapter::{ImageGeneration, REMOTE_FAILURE_PREAMBLE};
pub use config::{Config, VertexConfig};
pub use error::{CanvasError, Result};
pub use models::{
    AspectRatio, CanvasSubmission, GeneratedImage, GenerationRequest, GenerationResult, ModelInfo,
    ModelName,
};
pub use vertex::{ImageClient, VertexClient};
