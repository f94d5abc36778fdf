use std::fmt;

#[derive(Debug)]
pub enum CanvasError {
    ConfigError(String),
    RequestError(String),
    SerializationError(String),
    HttpError(String),
    VertexError(String),
    ResponseError(String),
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CanvasError::RequestError(msg) => write!(f, "Request error: {}", msg),
            CanvasError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            CanvasError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            CanvasError::VertexError(msg) => write!(f, "Vertex AI error: {}", msg),
            CanvasError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for CanvasError {}

pub type Result<T> = std::result::Result<T, CanvasError>;
