use crate::application::dto::{ExportFormat, ExportedDocument, ShareTarget};
use crate::budgeting::domain::AnalysisResult;
use crate::budgeting::policies::{TaxPolicy, TaxSummary};
use crate::ports::outbound::{BudgetDocument, BudgetFormatter, ExportData, ExportGateway};
use crate::shared::error::{ApiError, ArkitectoError};
use crate::shared::AppResult;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

const SHARE_SUBJECT: &str = "Presupuesto ARKITECTO AI";

/// Clears the in-flight flag when the export finishes, however it finishes
struct ExportSlot<'a>(&'a AtomicBool);

impl<'a> ExportSlot<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportSlot(flag))
    }
}

impl Drop for ExportSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// BudgetPresenter - renders an analysis result and drives its export and share actions
///
/// At most one export runs at a time: a trigger issued while another
/// export is pending is ignored and reported as `Ok(None)`.
///
/// # Type Parameters
/// * `E` - ExportGateway implementation
/// * `F` - BudgetFormatter implementation
pub struct BudgetPresenter<E, F> {
    export_gateway: E,
    formatter: F,
    export_in_flight: AtomicBool,
}

impl<E, F> BudgetPresenter<E, F>
where
    E: ExportGateway,
    F: BudgetFormatter,
{
    pub fn new(export_gateway: E, formatter: F) -> Self {
        Self {
            export_gateway,
            formatter,
            export_in_flight: AtomicBool::new(false),
        }
    }

    /// Net, IVA and gross totals of a result
    pub fn tax_summary(result: &AnalysisResult) -> TaxSummary {
        let server_total = result.breakdown.and_then(|b| b.total_con_iva);
        TaxPolicy::summarize(result.total, server_total)
    }

    /// Renders the result with the configured formatter
    pub fn render(&self, result: &AnalysisResult, title: Option<&str>) -> String {
        let document = BudgetDocument {
            title,
            category: result.category.as_deref(),
            items: &result.items,
            tax: Self::tax_summary(result),
        };
        self.formatter.format(&document)
    }

    pub fn is_exporting(&self) -> bool {
        self.export_in_flight.load(Ordering::Acquire)
    }

    /// Asks the backend to render the result in the given format
    ///
    /// # Returns
    /// `None` when another export is still pending and this trigger was ignored
    pub async fn export(
        &self,
        result: &AnalysisResult,
        format: ExportFormat,
    ) -> AppResult<Option<ExportedDocument>> {
        let Some(_slot) = ExportSlot::acquire(&self.export_in_flight) else {
            debug!(%format, "export already in flight, ignoring trigger");
            return Ok(None);
        };

        let data = ExportData::from(result);
        let content = match format {
            ExportFormat::Pdf => self.export_gateway.export_pdf(&data).await?,
            ExportFormat::Excel => self.export_gateway.export_excel(&data).await?,
            ExportFormat::Text => self.export_gateway.export_text(&data).await?.into_bytes(),
        };

        if content.is_empty() {
            return Err(ArkitectoError::Api(ApiError::Decode {
                message: format!("empty {} document", format),
            }));
        }

        info!(%format, bytes = content.len(), "budget exported");
        Ok(Some(ExportedDocument { format, content }))
    }

    /// Builds a link that opens the target app with a pre-filled budget summary
    pub fn share_link(&self, result: &AnalysisResult, title: Option<&str>, target: ShareTarget) -> String {
        let message = self.render(result, title);
        match target {
            ShareTarget::WhatsApp => {
                format!("https://wa.me/?text={}", urlencoding::encode(&message))
            }
            ShareTarget::Email => {
                let subject = match title {
                    Some(title) => format!("{} - {}", SHARE_SUBJECT, title),
                    None => SHARE_SUBJECT.to_string(),
                };
                format!(
                    "mailto:?subject={}&body={}",
                    urlencoding::encode(&subject),
                    urlencoding::encode(&message)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgeting::domain::{BudgetItem, CostBreakdown, NewBudgetItem};
    use crate::shared::ApiResult;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct MockExportGateway {
        calls: AtomicUsize,
        release: Arc<Notify>,
        block: bool,
        fail: bool,
    }

    impl MockExportGateway {
        fn immediate() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                release: Arc::new(Notify::new()),
                block: false,
                fail: false,
            }
        }

        async fn render(&self, body: &[u8]) -> ApiResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.block {
                self.release.notified().await;
            }
            if self.fail {
                return Err(ApiError::Application {
                    status: 500,
                    message: "500 Internal Server Error".to_string(),
                    detail: Some("Error generando PDF".to_string()),
                });
            }
            Ok(body.to_vec())
        }
    }

    #[async_trait]
    impl ExportGateway for MockExportGateway {
        async fn export_pdf(&self, _data: &ExportData) -> ApiResult<Vec<u8>> {
            self.render(b"%PDF-1.4").await
        }

        async fn export_excel(&self, _data: &ExportData) -> ApiResult<Vec<u8>> {
            self.render(b"PK\x03\x04").await
        }

        async fn export_text(&self, _data: &ExportData) -> ApiResult<String> {
            self.render(b"PRESUPUESTO").await.map(|b| String::from_utf8_lossy(&b).into_owned())
        }
    }

    struct CountingFormatter;

    impl BudgetFormatter for CountingFormatter {
        fn format(&self, document: &BudgetDocument<'_>) -> String {
            format!(
                "{} items & total {}",
                document.items.len(),
                document.tax.total_with_tax
            )
        }
    }

    fn item(subtotal: f64) -> BudgetItem {
        NewBudgetItem {
            elemento: "Radier".to_string(),
            descripcion: String::new(),
            cantidad: 1.0,
            unidad: "m3".to_string(),
            precio_unitario: subtotal,
            apu_origen: None,
        }
        .build()
        .unwrap()
    }

    fn result(total: f64, breakdown: Option<CostBreakdown>) -> AnalysisResult {
        AnalysisResult {
            narrative: "Radier".to_string(),
            items: vec![item(total)],
            total,
            breakdown,
            currency: "CLP".to_string(),
            category: None,
        }
    }

    #[test]
    fn test_tax_summary_uses_fixed_rate() {
        let summary = BudgetPresenter::<MockExportGateway, CountingFormatter>::tax_summary(
            &result(100_000.0, None),
        );
        assert!((summary.total_with_tax - 119_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_tax_summary_prefers_server_total() {
        let breakdown = CostBreakdown {
            total_con_iva: Some(130_000.0),
            ..CostBreakdown::default()
        };
        let summary = BudgetPresenter::<MockExportGateway, CountingFormatter>::tax_summary(
            &result(100_000.0, Some(breakdown)),
        );
        assert_eq!(summary.total_with_tax, 130_000.0);
        assert_eq!(summary.tax, 30_000.0);
    }

    #[tokio::test]
    async fn test_export_returns_document() {
        let presenter = BudgetPresenter::new(MockExportGateway::immediate(), CountingFormatter);
        let document = presenter
            .export(&result(1000.0, None), ExportFormat::Pdf)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document.content, b"%PDF-1.4");
        assert!(!presenter.is_exporting());
    }

    #[tokio::test]
    async fn test_text_export_is_utf8_bytes() {
        let presenter = BudgetPresenter::new(MockExportGateway::immediate(), CountingFormatter);
        let document = presenter
            .export(&result(1000.0, None), ExportFormat::Text)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document.content, b"PRESUPUESTO");
    }

    #[tokio::test]
    async fn test_second_export_ignored_while_first_pending() {
        let gateway = MockExportGateway {
            block: true,
            ..MockExportGateway::immediate()
        };
        let release = gateway.release.clone();
        let presenter = BudgetPresenter::new(gateway, CountingFormatter);
        let analysis = result(1000.0, None);

        let first = presenter.export(&analysis, ExportFormat::Pdf);
        let second = async {
            tokio::task::yield_now().await;
            assert!(presenter.is_exporting());
            let ignored = presenter.export(&analysis, ExportFormat::Excel).await.unwrap();
            release.notify_one();
            ignored
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.unwrap().is_some());
        assert!(second.is_none());
        assert_eq!(presenter.export_gateway.calls.load(Ordering::SeqCst), 1);
        assert!(!presenter.is_exporting());
    }

    #[tokio::test]
    async fn test_failed_export_releases_slot() {
        let gateway = MockExportGateway {
            fail: true,
            ..MockExportGateway::immediate()
        };
        let presenter = BudgetPresenter::new(gateway, CountingFormatter);

        let err = presenter
            .export(&result(1000.0, None), ExportFormat::Pdf)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error generando PDF");
        assert!(!presenter.is_exporting());
    }

    #[test]
    fn test_whatsapp_link_is_urlencoded() {
        let presenter = BudgetPresenter::new(MockExportGateway::immediate(), CountingFormatter);
        let link = presenter.share_link(&result(1000.0, None), None, ShareTarget::WhatsApp);
        assert!(link.starts_with("https://wa.me/?text="));
        assert!(link.contains("1%20items%20%26%20total"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn test_email_link_has_subject_and_body() {
        let presenter = BudgetPresenter::new(MockExportGateway::immediate(), CountingFormatter);
        let link = presenter.share_link(&result(1000.0, None), Some("Quincho"), ShareTarget::Email);
        assert!(link.starts_with("mailto:?subject=Presupuesto%20ARKITECTO%20AI%20-%20Quincho&body="));
        assert!(link.contains("1%20items"));
    }
}
