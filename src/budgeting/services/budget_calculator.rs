use crate::budgeting::domain::{Budget, BudgetItem};
use crate::shared::error::ArkitectoError;
use crate::shared::AppResult;

/// BudgetCalculator keeps budget aggregates consistent with their items.
///
/// After any local item edit `total_final` is recomputed from the items;
/// a previously cached total is never reused.
pub struct BudgetCalculator;

impl BudgetCalculator {
    /// Sum of the subtotals of all items, in order
    pub fn sum_subtotals(items: &[BudgetItem]) -> f64 {
        items.iter().map(BudgetItem::subtotal).sum()
    }

    /// Returns the budget with `total_final` recomputed from its items
    pub fn recompute(mut budget: Budget) -> Budget {
        budget.total_final = Self::sum_subtotals(&budget.items);
        budget
    }

    /// Appends an item and recomputes the final total
    pub fn with_item_added(mut budget: Budget, item: BudgetItem) -> Budget {
        budget.items.push(item);
        Self::recompute(budget)
    }

    /// Removes the item at `index` and recomputes the final total
    ///
    /// # Errors
    /// Returns a validation error when `index` is out of range
    pub fn with_item_removed(mut budget: Budget, index: usize) -> AppResult<Budget> {
        if index >= budget.items.len() {
            return Err(ArkitectoError::validation(
                "item index",
                format!(
                    "{} is out of range (budget has {} item(s))",
                    index,
                    budget.items.len()
                ),
            ));
        }
        budget.items.remove(index);
        Ok(Self::recompute(budget))
    }

    /// Total of an analysis: the server-supplied estimate when it carries a
    /// positive value, otherwise the sum of the item subtotals.
    pub fn analysis_total(server_total: Option<f64>, items: &[BudgetItem]) -> f64 {
        server_total
            .filter(|total| total.is_finite() && *total > 0.0)
            .unwrap_or_else(|| Self::sum_subtotals(items))
    }
}
