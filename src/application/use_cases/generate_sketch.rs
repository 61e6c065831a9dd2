use crate::ports::outbound::{AnalysisGateway, ImageUpload};
use crate::shared::error::{ApiError, ArkitectoError};
use crate::shared::AppResult;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, info};

const GENERIC_SKETCH_ERROR: &str = "Error generating the render. Please try again.";

/// A render returned by the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSketch {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedSketch {
    /// Decodes a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(data_url: &str) -> AppResult<Self> {
        let decode_error = |message: String| ArkitectoError::Api(ApiError::Decode { message });

        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| decode_error("generated image is not a data URL".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| decode_error("generated image has no payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| decode_error("generated image is not base64 encoded".to_string()))?;

        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| decode_error(format!("invalid base64 image: {}", e)))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// GenerateSketchUseCase - turns a prompt (and optionally a site photo) into a render
pub struct GenerateSketchUseCase<A> {
    analysis_gateway: A,
}

impl<A: AnalysisGateway> GenerateSketchUseCase<A> {
    pub fn new(analysis_gateway: A) -> Self {
        Self { analysis_gateway }
    }

    /// Requests a render
    ///
    /// # Errors
    /// - validation error when the prompt is blank (nothing is sent)
    /// - [`ArkitectoError::AnalysisRejected`] when the backend reports a failed generation
    pub async fn execute(&self, image: Option<&ImageUpload>, prompt: &str) -> AppResult<GeneratedSketch> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ArkitectoError::validation("prompt", "must not be empty"));
        }

        debug!(with_image = image.is_some(), "requesting sketch");
        let payload = self.analysis_gateway.generate_sketch(image, prompt).await?;

        let data_url = match payload.generated_image {
            Some(data_url) if payload.success => data_url,
            _ => {
                let message = payload
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_SKETCH_ERROR.to_string());
                return Err(ArkitectoError::AnalysisRejected { message });
            }
        };

        let sketch = GeneratedSketch::from_data_url(&data_url)?;
        info!(bytes = sketch.bytes.len(), mime = %sketch.mime_type, "sketch generated");
        Ok(sketch)
    }
}
