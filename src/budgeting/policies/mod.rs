mod load_retry;
mod tax;

pub use load_retry::{LoadRetryPolicy, RetryDecision};
pub use tax::{TaxPolicy, TaxSummary, IVA_RATE};
