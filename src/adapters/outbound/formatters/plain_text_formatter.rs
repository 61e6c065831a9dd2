use crate::budgeting::policies::IVA_RATE;
use crate::budgeting::services::CurrencyFormatter;
use crate::ports::outbound::{BudgetDocument, BudgetFormatter};
use chrono::{DateTime, Local};

const RULE_WIDTH: usize = 50;
const MAX_ELEMENTO_CHARS: usize = 40;

/// PlainTextBudgetFormatter adapter producing the shareable text summary
///
/// The same text is used for the terminal view and for WhatsApp/email
/// share messages, so it sticks to plain characters and short lines.
pub struct PlainTextBudgetFormatter {
    generated_at: DateTime<Local>,
}

impl PlainTextBudgetFormatter {
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Formatter stamping a fixed generation time
    pub fn at(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }
}

impl Default for PlainTextBudgetFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetFormatter for PlainTextBudgetFormatter {
    fn format(&self, document: &BudgetDocument<'_>) -> String {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let mut lines = vec![
            heavy.clone(),
            "ARKITECTO AI - PRESUPUESTO".to_string(),
            heavy.clone(),
        ];

        if let Some(title) = document.title {
            lines.push(format!("Proyecto: {}", title));
        }
        lines.push(format!(
            "Fecha: {}",
            self.generated_at.format("%d/%m/%Y %H:%M")
        ));
        lines.push(String::new());

        if let Some(category) = document.category.filter(|c| !c.is_empty()) {
            lines.push(format!("Categoria: {}", category));
            lines.push(String::new());
        }

        lines.push("DETALLE DE PARTIDAS:".to_string());
        lines.push(light.clone());
        for (index, item) in document.items.iter().enumerate() {
            let elemento: String = item.elemento().chars().take(MAX_ELEMENTO_CHARS).collect();
            lines.push(format!("{}. {}", index + 1, elemento));
            lines.push(format!(
                "   {:.2} {} = {}",
                item.cantidad(),
                item.unidad(),
                CurrencyFormatter::format(item.subtotal())
            ));
        }
        lines.push(light);
        lines.push(String::new());

        lines.push("RESUMEN:".to_string());
        lines.push(format!(
            "Total Neto: {}",
            CurrencyFormatter::format(document.tax.net)
        ));
        lines.push(format!(
            "IVA ({}%): {}",
            (IVA_RATE * 100.0).round(),
            CurrencyFormatter::format(document.tax.tax)
        ));
        lines.push(format!(
            "TOTAL: {}",
            CurrencyFormatter::format(document.tax.total_with_tax)
        ));
        lines.push(String::new());
        lines.push(heavy);
        lines.push("Generado por ARKITECTO AI PRO".to_string());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgeting::domain::{BudgetItem, NewBudgetItem};
    use crate::budgeting::policies::TaxPolicy;
    use chrono::TimeZone;

    fn item(elemento: &str, cantidad: f64, unidad: &str, precio: f64) -> BudgetItem {
        NewBudgetItem {
            elemento: elemento.to_string(),
            descripcion: String::new(),
            cantidad,
            unidad: unidad.to_string(),
            precio_unitario: precio,
            apu_origen: None,
        }
        .build()
        .unwrap()
    }

    fn formatter() -> PlainTextBudgetFormatter {
        let at = Local.with_ymd_and_hms(2024, 6, 3, 14, 5, 0).unwrap();
        PlainTextBudgetFormatter::at(at)
    }

    #[test]
    fn test_summary_layout() {
        let items = vec![
            item("Muro de albañilería", 10.0, "m2", 18_990.0),
            item("Radier", 2.5, "m3", 95_000.0),
        ];
        let document = BudgetDocument {
            title: Some("Quincho"),
            category: Some("obra gruesa"),
            items: &items,
            tax: TaxPolicy::summarize(427_400.0, None),
        };

        let text = formatter().format(&document);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(50));
        assert_eq!(lines[1], "ARKITECTO AI - PRESUPUESTO");
        assert_eq!(lines[3], "Proyecto: Quincho");
        assert_eq!(lines[4], "Fecha: 03/06/2024 14:05");
        assert!(text.contains("Categoria: obra gruesa"));
        assert!(text.contains("1. Muro de albañilería\n   10.00 m2 = $189.900"));
        assert!(text.contains("2. Radier\n   2.50 m3 = $237.500"));
        assert!(text.contains("Total Neto: $427.400"));
        assert!(text.contains("IVA (19%): $81.206"));
        assert!(text.contains("TOTAL: $508.606"));
        assert_eq!(lines.last(), Some(&"Generado por ARKITECTO AI PRO"));
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let long = "Excavación manual en terreno semiduro con extracción a botadero";
        let items = vec![item(long, 1.0, "m3", 1.0)];
        let document = BudgetDocument {
            title: None,
            category: None,
            items: &items,
            tax: TaxPolicy::summarize(1.0, None),
        };

        let text = formatter().format(&document);
        let expected: String = long.chars().take(40).collect();

        assert!(text.contains(&format!("1. {}\n", expected)));
        assert!(!text.contains("Proyecto:"));
        assert!(!text.contains("Categoria:"));
    }

    #[test]
    fn test_server_tax_total_is_used() {
        let items = vec![item("Pintura", 30.0, "m2", 4_000.0)];
        let document = BudgetDocument {
            title: None,
            category: None,
            items: &items,
            tax: TaxPolicy::summarize(120_000.0, Some(150_000.0)),
        };

        let text = formatter().format(&document);

        assert!(text.contains("IVA (19%): $30.000"));
        assert!(text.contains("TOTAL: $150.000"));
    }
}
