use crate::{
    adapter::ImageGeneration,
    error::{CanvasError, Result},
    models::{GeneratedImage, GenerationRequest, ModelInfo, ModelName},
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Locale tag sent with every prompt; the form's prompt text is Japanese.
pub const PROMPT_LANGUAGE: &str = "ja";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PromptInstance<'a>>,
    parameters: PredictParameters<'a>,
}

#[derive(Debug, Serialize)]
struct PromptInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    guidance_scale: f32,
    aspect_ratio: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    project_id: String,
    location: String,
    access_token: String,
    endpoint: Option<String>,
}

impl ImageClient {
    pub fn new(
        http: reqwest::Client,
        project_id: String,
        location: String,
        access_token: String,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            http,
            project_id,
            location,
            access_token,
            endpoint,
        }
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo::new(
                "imagegeneration@002",
                "Imagen",
                "google",
                "Earlier Imagen release, kept for result comparison",
            ),
            ModelInfo::new(
                "imagegeneration@006",
                "Imagen 2",
                "google",
                "Current Imagen release, the form's default",
            ),
        ]
    }

    fn predict_url(&self, model: ModelName) -> String {
        let base = match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", self.location),
        };
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
            base,
            self.project_id,
            self.location,
            model.as_str()
        )
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
        let payload = PredictRequest {
            instances: vec![PromptInstance {
                prompt: &request.prompt,
            }],
            parameters: PredictParameters {
                sample_count: request.image_count,
                negative_prompt: request.negative_prompt.as_deref(),
                guidance_scale: request.guidance_scale,
                aspect_ratio: request.aspect_ratio.as_str(),
                language: PROMPT_LANGUAGE,
                seed: request.seed,
            },
        };

        let payload_json = serde_json::to_string(&payload)
            .map_err(|e| CanvasError::SerializationError(e.to_string()))?;

        log::info!(
            "Generating {} image(s) with model: {}",
            request.image_count,
            request.model_name.as_str()
        );
        log::debug!("Prediction request payload: {}", payload_json);

        let response = self
            .http
            .post(self.predict_url(request.model_name))
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload_json)
            .send()
            .await
            .map_err(|e| CanvasError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Vertex AI prediction error {}: {}", status, body);
            return Err(CanvasError::VertexError(format!("{} - {}", status, body)));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| CanvasError::ResponseError(e.to_string()))?;

        if parsed.predictions.is_empty() {
            return Err(CanvasError::ResponseError("No images generated".into()));
        }

        let mut images = Vec::with_capacity(parsed.predictions.len());
        for prediction in parsed.predictions {
            let encoded = prediction
                .bytes_base64_encoded
                .ok_or_else(|| CanvasError::ResponseError("Prediction missing image payload".into()))?;
            let bytes = general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| CanvasError::ResponseError(e.to_string()))?;
            let mime_type = prediction
                .mime_type
                .unwrap_or_else(|| "image/png".to_string());
            images.push(GeneratedImage::new(bytes, mime_type));
        }

        Ok(images)
    }
}

#[async_trait]
impl ImageGeneration for ImageClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
        ImageClient::generate(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AspectRatio, CanvasSubmission};

    fn request_with(negative: &str, seed: i64) -> GenerationRequest {
        GenerationRequest::from_submission(&CanvasSubmission {
            model_name: "imagegeneration@006".to_string(),
            prompt: "夕暮れの湖".to_string(),
            negative_prompt: negative.to_string(),
            sample_image_size: "1024".to_string(),
            aspect_ratio: "9:16".to_string(),
            sample_count: 2,
            seed,
        })
    }

    fn payload_json(request: &GenerationRequest) -> serde_json::Value {
        let payload = PredictRequest {
            instances: vec![PromptInstance {
                prompt: &request.prompt,
            }],
            parameters: PredictParameters {
                sample_count: request.image_count,
                negative_prompt: request.negative_prompt.as_deref(),
                guidance_scale: request.guidance_scale,
                aspect_ratio: request.aspect_ratio.as_str(),
                language: PROMPT_LANGUAGE,
                seed: request.seed,
            },
        };
        serde_json::to_value(&payload).unwrap()
    }

    #[test]
    fn optional_fields_are_omitted_when_unset() {
        let json = payload_json(&request_with("", -1));
        let parameters = &json["parameters"];
        assert!(parameters.get("negativePrompt").is_none());
        assert!(parameters.get("seed").is_none());
    }

    #[test]
    fn wire_names_are_camel_case_and_language_is_fixed() {
        let json = payload_json(&request_with("ノイズ", 42));
        assert_eq!(json["instances"][0]["prompt"], "夕暮れの湖");
        let parameters = &json["parameters"];
        assert_eq!(parameters["sampleCount"], 2);
        assert_eq!(parameters["negativePrompt"], "ノイズ");
        assert_eq!(parameters["guidanceScale"], 1024.0);
        assert_eq!(parameters["aspectRatio"], "9:16");
        assert_eq!(parameters["language"], "ja");
        assert_eq!(parameters["seed"], 42);
    }

    #[test]
    fn predict_url_targets_the_regional_endpoint() {
        let client = ImageClient::new(
            reqwest::Client::new(),
            "demo-project".to_string(),
            "asia-northeast1".to_string(),
            "token".to_string(),
            None,
        );
        assert_eq!(
            client.predict_url(ModelName::ImageGeneration006),
            "https://asia-northeast1-aiplatform.googleapis.com/v1/projects/demo-project/locations/asia-northeast1/publishers/google/models/imagegeneration@006:predict"
        );
    }

    #[test]
    fn endpoint_override_replaces_the_host() {
        let client = ImageClient::new(
            reqwest::Client::new(),
            "demo-project".to_string(),
            "asia-northeast1".to_string(),
            "token".to_string(),
            Some("http://127.0.0.1:9090/".to_string()),
        );
        assert!(client
            .predict_url(ModelName::ImageGeneration002)
            .starts_with("http://127.0.0.1:9090/v1/projects/demo-project"));
    }

    #[test]
    fn aspect_ratio_labels_match_the_form_choices() {
        for (ratio, label) in [
            (AspectRatio::Square, "1:1"),
            (AspectRatio::Portrait9x16, "9:16"),
            (AspectRatio::Landscape16x9, "16:9"),
            (AspectRatio::Portrait3x4, "3:4"),
            (AspectRatio::Landscape4x3, "4:3"),
        ] {
            assert_eq!(ratio.as_str(), label);
        }
    }
}
