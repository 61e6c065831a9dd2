/// Formatters for rendering budgets as text
mod plain_text_formatter;

pub use plain_text_formatter::PlainTextBudgetFormatter;
