/// Chilean VAT (IVA) rate applied to net budget totals
pub const IVA_RATE: f64 = 0.19;

/// Net, tax and gross amounts of a budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxSummary {
    pub net: f64,
    pub tax: f64,
    pub total_with_tax: f64,
}

/// TaxPolicy encodes how the tax line of a budget is obtained.
///
/// Priority order:
/// 1. the tax-inclusive total supplied by the server (tax = gross - net)
/// 2. a fixed 19% of the net total
pub struct TaxPolicy;

impl TaxPolicy {
    /// Computes the tax summary for a net total
    ///
    /// # Arguments
    /// * `net` - Net budget total
    /// * `server_total_with_tax` - Tax-inclusive total from the server, if any
    pub fn summarize(net: f64, server_total_with_tax: Option<f64>) -> TaxSummary {
        match server_total_with_tax {
            Some(total_with_tax) => TaxSummary {
                net,
                tax: total_with_tax - net,
                total_with_tax,
            },
            None => {
                let tax = net * IVA_RATE;
                TaxSummary {
                    net,
                    tax,
                    total_with_tax: net + tax,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rate_without_server_total() {
        let summary = TaxPolicy::summarize(100_000.0, None);
        assert_eq!(summary.net, 100_000.0);
        assert!((summary.tax - 19_000.0).abs() < 1e-6);
        assert!((summary.total_with_tax - 119_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_server_total_takes_precedence() {
        let summary = TaxPolicy::summarize(100_000.0, Some(125_000.0));
        assert_eq!(summary.total_with_tax, 125_000.0);
        assert_eq!(summary.tax, 25_000.0);
    }

    #[test]
    fn test_zero_net() {
        let summary = TaxPolicy::summarize(0.0, None);
        assert_eq!(summary.tax, 0.0);
        assert_eq!(summary.total_with_tax, 0.0);
    }
}
