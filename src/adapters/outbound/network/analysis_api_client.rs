use super::http::{self, HttpSettings};
use crate::ports::outbound::{
    AnalysisGateway, AnalysisPayload, ExportData, ExportGateway, HealthStatus, ImageUpload,
    SketchPayload, SuggestionsPayload,
};
use crate::shared::error::ApiError;
use crate::shared::{ApiResult, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct TextExportResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// AnalysisApiClient adapter for the public analysis, generation and export API
///
/// None of these endpoints take a credential.
#[derive(Clone)]
pub struct AnalysisApiClient {
    client: reqwest::Client,
    settings: HttpSettings,
}

impl AnalysisApiClient {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        let client = http::build_client(&settings)?;
        Ok(Self { client, settings })
    }

    fn image_part(image: &ImageUpload) -> Part {
        let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        match part.mime_str(&image.mime_type) {
            Ok(part) => part,
            Err(_) => {
                warn!(mime = %image.mime_type, "invalid image MIME type, sending without one");
                Part::bytes(image.bytes.clone()).file_name(image.file_name.clone())
            }
        }
    }

    async fn export_binary(&self, path: &str, data: &ExportData) -> ApiResult<Vec<u8>> {
        debug!(path, items = data.presupuesto.items.len(), "requesting export");
        let request = self.client.post(self.settings.url(path)).json(data);
        http::send_bytes(request).await
    }
}

#[async_trait]
impl AnalysisGateway for AnalysisApiClient {
    async fn analyze_budget(
        &self,
        image: &ImageUpload,
        instruction: &str,
    ) -> ApiResult<AnalysisPayload> {
        debug!(file = %image.file_name, "POST /analyze_budget");
        let form = Form::new()
            .part("image", Self::image_part(image))
            .text("instruction", instruction.to_string());
        let request = self
            .client
            .post(self.settings.url("/analyze_budget"))
            .multipart(form);
        http::send_json(request).await
    }

    async fn generate_sketch(
        &self,
        image: Option<&ImageUpload>,
        prompt: &str,
    ) -> ApiResult<SketchPayload> {
        debug!(with_image = image.is_some(), "POST /generate_sketch");
        let mut form = Form::new().text("prompt", prompt.to_string());
        if let Some(image) = image {
            form = form.part("image", Self::image_part(image));
        }
        let request = self
            .client
            .post(self.settings.url("/generate_sketch"))
            .multipart(form);
        http::send_json(request).await
    }

    async fn check_health(&self) -> ApiResult<HealthStatus> {
        http::send_json(self.client.get(self.settings.url("/"))).await
    }

    async fn suggestions(&self) -> ApiResult<SuggestionsPayload> {
        debug!("GET /suggestions");
        http::send_json(self.client.get(self.settings.url("/suggestions"))).await
    }
}

#[async_trait]
impl ExportGateway for AnalysisApiClient {
    async fn export_pdf(&self, data: &ExportData) -> ApiResult<Vec<u8>> {
        self.export_binary("/export/pdf", data).await
    }

    async fn export_excel(&self, data: &ExportData) -> ApiResult<Vec<u8>> {
        self.export_binary("/export/excel", data).await
    }

    async fn export_text(&self, data: &ExportData) -> ApiResult<String> {
        debug!(items = data.presupuesto.items.len(), "requesting text export");
        let request = self.client.post(self.settings.url("/export/text")).json(data);
        let response: TextExportResponse = http::send_json(request).await?;
        match response.text {
            Some(text) if response.success => Ok(text),
            _ => Err(ApiError::Application {
                status: 200,
                message: "text export failed".to_string(),
                detail: response.error,
            }),
        }
    }
}
