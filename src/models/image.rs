use serde::{Deserialize, Serialize};

/// Largest seed the hosted model accepts. Values outside [0, SEED_MAX]
/// are treated as "unset" and the remote side picks a random seed.
pub const SEED_MAX: i64 = 2_147_483_647;

pub const MIN_IMAGE_COUNT: u32 = 1;
pub const MAX_IMAGE_COUNT: u32 = 4;
pub const DEFAULT_IMAGE_COUNT: u32 = 4;

/// Fallback when the size selector carries an unparsable label.
pub const DEFAULT_GUIDANCE_SCALE: f32 = 1536.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelName {
    #[serde(rename = "imagegeneration@002")]
    ImageGeneration002,
    #[serde(rename = "imagegeneration@006")]
    ImageGeneration006,
}

impl ModelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::ImageGeneration002 => "imagegeneration@002",
            ModelName::ImageGeneration006 => "imagegeneration@006",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "imagegeneration@002" => Some(ModelName::ImageGeneration002),
            "imagegeneration@006" => Some(ModelName::ImageGeneration006),
            _ => None,
        }
    }
}

impl Default for ModelName {
    fn default() -> Self {
        ModelName::ImageGeneration006
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "16:9")]
    Landscape16x9,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "4:3")]
    Landscape4x3,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape16x9 => "16:9",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Landscape4x3 => "4:3",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "1:1" => Some(AspectRatio::Square),
            "9:16" => Some(AspectRatio::Portrait9x16),
            "16:9" => Some(AspectRatio::Landscape16x9),
            "3:4" => Some(AspectRatio::Portrait3x4),
            "4:3" => Some(AspectRatio::Landscape4x3),
            _ => None,
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

/// Raw field values exactly as the form posts them. Every field except the
/// prompt is optional on the wire and falls back to the form's defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasSubmission {
    #[serde(default)]
    pub model_name: String,
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    /// Size selector label ("256" | "1024" | "1536"). The hosted API takes
    /// no pixel size; the selected value feeds `guidance_scale`.
    #[serde(default = "default_size_label")]
    pub sample_image_size: String,
    #[serde(default)]
    pub aspect_ratio: String,
    #[serde(default = "default_sample_count")]
    pub sample_count: u32,
    /// -1 means "unset".
    #[serde(default = "default_seed")]
    pub seed: i64,
}

fn default_size_label() -> String {
    "1536".to_string()
}

fn default_sample_count() -> u32 {
    DEFAULT_IMAGE_COUNT
}

fn default_seed() -> i64 {
    -1
}

/// Normalized request handed to the invocation adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model_name: ModelName,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub guidance_scale: f32,
    pub aspect_ratio: AspectRatio,
    pub image_count: u32,
    pub seed: Option<i32>,
}

impl GenerationRequest {
    /// Builds a request from raw form values. Total over all inputs:
    /// unknown labels normalize to defaults, the empty negative prompt and
    /// out-of-range seeds are dropped, and the image count is clamped.
    pub fn from_submission(raw: &CanvasSubmission) -> Self {
        let negative_prompt = if raw.negative_prompt.is_empty() {
            None
        } else {
            Some(raw.negative_prompt.clone())
        };

        let seed = if (0..=SEED_MAX).contains(&raw.seed) {
            Some(raw.seed as i32)
        } else {
            None
        };

        let guidance_scale = raw
            .sample_image_size
            .trim()
            .parse()
            .unwrap_or(DEFAULT_GUIDANCE_SCALE);

        GenerationRequest {
            model_name: ModelName::from_id(&raw.model_name).unwrap_or_default(),
            prompt: raw.prompt.clone(),
            negative_prompt,
            guidance_scale,
            aspect_ratio: AspectRatio::from_label(&raw.aspect_ratio).unwrap_or_default(),
            image_count: raw.sample_count.clamp(MIN_IMAGE_COUNT, MAX_IMAGE_COUNT),
            seed,
        }
    }
}

/// One decoded image as returned by the remote capability.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Outcome of one invocation. Exactly one variant per call; there is no
/// partial-success shape.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Images(Vec<GeneratedImage>),
    Failed(String),
}

impl GenerationResult {
    pub fn images(&self) -> &[GeneratedImage] {
        match self {
            GenerationResult::Images(images) => images,
            GenerationResult::Failed(_) => &[],
        }
    }

    /// Error text for the UI; empty on success.
    pub fn error(&self) -> &str {
        match self {
            GenerationResult::Images(_) => "",
            GenerationResult::Failed(message) => message,
        }
    }

    /// The (ordered image list, error string) pair the form consumes.
    pub fn into_parts(self) -> (Vec<GeneratedImage>, String) {
        match self {
            GenerationResult::Images(images) => (images, String::new()),
            GenerationResult::Failed(message) => (Vec::new(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> CanvasSubmission {
        CanvasSubmission {
            model_name: "imagegeneration@006".to_string(),
            prompt: "daytime, shot from above, birds in motion".to_string(),
            negative_prompt: String::new(),
            sample_image_size: "1536".to_string(),
            aspect_ratio: "1:1".to_string(),
            sample_count: 4,
            seed: -1,
        }
    }

    #[test]
    fn empty_negative_prompt_is_dropped() {
        let request = GenerationRequest::from_submission(&submission());
        assert_eq!(request.negative_prompt, None);
    }

    #[test]
    fn non_empty_negative_prompt_passes_through() {
        let mut raw = submission();
        raw.negative_prompt = "blurry, text overlays".to_string();
        let request = GenerationRequest::from_submission(&raw);
        assert_eq!(
            request.negative_prompt.as_deref(),
            Some("blurry, text overlays")
        );
    }

    #[test]
    fn out_of_range_seeds_are_dropped() {
        for seed in [-1, -42, SEED_MAX + 1, i64::MAX, i64::MIN] {
            let mut raw = submission();
            raw.seed = seed;
            let request = GenerationRequest::from_submission(&raw);
            assert_eq!(request.seed, None, "seed {} should be unset", seed);
        }
    }

    #[test]
    fn boundary_seeds_are_retained() {
        let mut raw = submission();
        raw.seed = 0;
        assert_eq!(GenerationRequest::from_submission(&raw).seed, Some(0));

        raw.seed = SEED_MAX;
        assert_eq!(
            GenerationRequest::from_submission(&raw).seed,
            Some(SEED_MAX as i32)
        );
    }

    #[test]
    fn size_label_becomes_guidance_scale() {
        let mut raw = submission();
        raw.sample_image_size = "256".to_string();
        let request = GenerationRequest::from_submission(&raw);
        assert_eq!(request.guidance_scale, 256.0);
    }

    #[test]
    fn unparsable_size_label_falls_back() {
        let mut raw = submission();
        raw.sample_image_size = "enormous".to_string();
        let request = GenerationRequest::from_submission(&raw);
        assert_eq!(request.guidance_scale, DEFAULT_GUIDANCE_SCALE);
    }

    #[test]
    fn unknown_labels_normalize_to_defaults() {
        let mut raw = submission();
        raw.model_name = "imagegeneration@999".to_string();
        raw.aspect_ratio = "21:9".to_string();
        let request = GenerationRequest::from_submission(&raw);
        assert_eq!(request.model_name, ModelName::ImageGeneration006);
        assert_eq!(request.aspect_ratio, AspectRatio::Square);
    }

    #[test]
    fn image_count_is_clamped() {
        let mut raw = submission();
        raw.sample_count = 0;
        assert_eq!(
            GenerationRequest::from_submission(&raw).image_count,
            MIN_IMAGE_COUNT
        );

        raw.sample_count = 12;
        assert_eq!(
            GenerationRequest::from_submission(&raw).image_count,
            MAX_IMAGE_COUNT
        );
    }

    #[test]
    fn normalization_is_deterministic() {
        let mut raw = submission();
        raw.negative_prompt = "low quality".to_string();
        raw.seed = 77;
        let first = GenerationRequest::from_submission(&raw);
        let second = GenerationRequest::from_submission(&raw);
        assert_eq!(first, second);
    }

    #[test]
    fn result_parts_reflect_the_variant() {
        let images = vec![GeneratedImage::new(vec![1, 2, 3], "image/png")];
        let (list, error) = GenerationResult::Images(images.clone()).into_parts();
        assert_eq!(list, images);
        assert!(error.is_empty());

        let (list, error) = GenerationResult::Failed("quota exhausted".to_string()).into_parts();
        assert!(list.is_empty());
        assert_eq!(error, "quota exhausted");
    }
}
