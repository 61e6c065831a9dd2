use crate::budgeting::domain::BudgetItem;
use crate::budgeting::policies::TaxSummary;

/// Everything a formatter needs to render a budget
#[derive(Debug, Clone, Copy)]
pub struct BudgetDocument<'a> {
    pub title: Option<&'a str>,
    pub category: Option<&'a str>,
    pub items: &'a [BudgetItem],
    pub tax: TaxSummary,
}

/// BudgetFormatter port for client-side budget rendering (share messages, terminal view)
pub trait BudgetFormatter {
    /// Renders the budget document as text
    fn format(&self, document: &BudgetDocument<'_>) -> String;
}
