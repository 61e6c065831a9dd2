/// Document formats the backend can render a budget into
///
/// Lives in the application layer because both the CLI and the
/// presenter need to agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Printable PDF document
    Pdf,
    /// Excel workbook
    Excel,
    /// Plain text for the clipboard
    Text,
}

impl ExportFormat {
    /// Default file extension for a saved export
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Text => "txt",
        }
    }

    /// Whether the rendered document is binary
    pub fn is_binary(&self) -> bool {
        !matches!(self, ExportFormat::Text)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(format!(
                "Invalid export format: {}. Please specify 'pdf', 'excel' or 'text'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

/// A document rendered by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub format: ExportFormat,
    pub content: Vec<u8>,
}

impl ExportedDocument {
    /// Suggested file name for saving the document
    pub fn file_name(&self) -> String {
        format!("presupuesto_arkitecto.{}", self.format.extension())
    }
}
