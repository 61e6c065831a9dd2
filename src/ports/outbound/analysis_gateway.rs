use crate::budgeting::domain::{BudgetItem, CostBreakdown};
use crate::shared::ApiResult;
use async_trait::async_trait;
use serde::Deserialize;

/// File name sent when an analysis is requested without a photo
pub const PLACEHOLDER_IMAGE_NAME: &str = "placeholder.png";

/// An image file ready to be sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Empty stand-in file for text-only flows
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_IMAGE_NAME, "image/png", Vec::new())
    }

    pub fn is_placeholder(&self) -> bool {
        self.file_name == PLACEHOLDER_IMAGE_NAME && self.bytes.is_empty()
    }
}

/// Budget block of an analysis response
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BudgetPayload {
    #[serde(default)]
    pub items: Vec<BudgetItem>,
    #[serde(default)]
    pub total_estimado: Option<f64>,
    #[serde(default)]
    pub moneda: Option<String>,
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(default)]
    pub elementos_detectados: Option<u32>,
    #[serde(default)]
    pub items_con_precio: Option<u32>,
    #[serde(default)]
    pub generator: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
}

/// Decoded body of `POST /analyze_budget`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analisis: String,
    #[serde(default)]
    pub presupuesto: Option<BudgetPayload>,
    #[serde(default)]
    pub metadata: Option<AnalysisMetadata>,
    /// Human-readable failure reason when `success` is false
    #[serde(default)]
    pub error: Option<String>,
}

/// Decoded body of `POST /generate_sketch`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SketchPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub generated_image: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Decoded body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub brain: Option<String>,
}

/// A preset request from the quick-suggestion catalog
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SuggestionPayload {
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    /// Instruction sent for analysis when the preset is picked
    pub query: String,
    #[serde(default)]
    pub area_tipica: Option<f64>,
    #[serde(default)]
    pub metros_lineales: Option<f64>,
    #[serde(default)]
    pub puntos: Option<f64>,
    #[serde(default)]
    pub icono: String,
}

impl SuggestionPayload {
    /// The preset's query with its typical size appended, if it has one
    pub fn instruction(&self) -> String {
        let size = self
            .area_tipica
            .map(|area| format!("{} m2", trim_number(area)))
            .or_else(|| {
                self.metros_lineales
                    .map(|length| format!("{} metros lineales", trim_number(length)))
            })
            .or_else(|| self.puntos.map(|points| format!("{} puntos", trim_number(points))));
        match size {
            Some(size) => format!("{} {}", self.query.trim(), size),
            None => self.query.trim().to_string(),
        }
    }
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Decoded body of `GET /suggestions`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SuggestionsPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub suggestions: Vec<SuggestionPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

/// AnalysisGateway port for the public analysis and generation API
///
/// No credential is attached to these calls.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Sends an image and an instruction for budget analysis
    async fn analyze_budget(&self, image: &ImageUpload, instruction: &str)
        -> ApiResult<AnalysisPayload>;

    /// Requests an AI render for a prompt, optionally based on a photo
    async fn generate_sketch(&self, image: Option<&ImageUpload>, prompt: &str)
        -> ApiResult<SketchPayload>;

    /// Checks that the backend is reachable
    async fn check_health(&self) -> ApiResult<HealthStatus>;

    /// Fetches the quick-suggestion catalog of common requests
    async fn suggestions(&self) -> ApiResult<SuggestionsPayload>;
}
