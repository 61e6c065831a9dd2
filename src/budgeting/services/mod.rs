mod budget_calculator;
mod currency_formatter;

pub use budget_calculator::BudgetCalculator;
pub use currency_formatter::CurrencyFormatter;
