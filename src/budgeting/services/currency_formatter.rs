/// CurrencyFormatter renders amounts with the fixed es-CL / CLP pairing:
/// `$` prefix, `.` as thousands separator and no decimals.
pub struct CurrencyFormatter;

impl CurrencyFormatter {
    /// Formats an amount, e.g. `1234567.4` becomes `$1.234.567`
    pub fn format(amount: f64) -> String {
        if !amount.is_finite() {
            return "$0".to_string();
        }
        let rounded = amount.round();
        let negative = rounded < 0.0;
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if negative {
            format!("-${}", grouped)
        } else {
            format!("${}", grouped)
        }
    }
}
