use super::BudgetItem;
use serde::{Deserialize, Serialize};

/// Professional cost breakdown returned alongside an analysis.
///
/// Every component is optional; the backend only fills them for catalog-priced budgets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Direct cost (sum of priced lines before overheads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal_directo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mano_obra: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gastos_generales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imprevistos: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilidad: Option<f64>,
    /// Tax-inclusive total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_con_iva: Option<f64>,
}

impl CostBreakdown {
    pub fn is_empty(&self) -> bool {
        self.subtotal_directo.is_none()
            && self.mano_obra.is_none()
            && self.gastos_generales.is_none()
            && self.imprevistos.is_none()
            && self.utilidad.is_none()
            && self.total_con_iva.is_none()
    }
}

/// Result of one budget analysis, held in memory for the current session only.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub narrative: String,
    pub items: Vec<BudgetItem>,
    pub total: f64,
    pub breakdown: Option<CostBreakdown>,
    pub currency: String,
    pub category: Option<String>,
}

impl AnalysisResult {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
