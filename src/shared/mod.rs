/// Shared kernel: error types and result alias used across all layers
pub mod error;
pub mod result;
pub mod security;

pub use result::{ApiResult, AppResult, Result};
