use crate::budgeting::domain::{AnalysisResult, BudgetItem, CostBreakdown};
use crate::shared::ApiResult;
use async_trait::async_trait;
use serde::Serialize;

/// Budget block of an export request, mirroring the analysis response shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportBudget {
    pub items: Vec<BudgetItem>,
    pub total_estimado: f64,
    pub moneda: String,
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExportMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
}

/// Payload accepted by every `/export/*` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportData {
    pub presupuesto: ExportBudget,
    pub metadata: ExportMetadata,
}

impl From<&AnalysisResult> for ExportData {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            presupuesto: ExportBudget {
                items: result.items.clone(),
                total_estimado: result.total,
                moneda: result.currency.clone(),
                breakdown: result.breakdown.unwrap_or_default(),
            },
            metadata: ExportMetadata {
                categoria: result.category.clone(),
            },
        }
    }
}

/// ExportGateway port for server-side document rendering
#[async_trait]
pub trait ExportGateway: Send + Sync {
    /// Renders the budget as a PDF document
    async fn export_pdf(&self, data: &ExportData) -> ApiResult<Vec<u8>>;

    /// Renders the budget as an Excel workbook
    async fn export_excel(&self, data: &ExportData) -> ApiResult<Vec<u8>>;

    /// Renders the budget as plain text suitable for the clipboard
    async fn export_text(&self, data: &ExportData) -> ApiResult<String>;
}
