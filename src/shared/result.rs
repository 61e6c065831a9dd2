use crate::shared::error::ApiError;

/// Type alias for Result with anyhow::Error as the error type.
/// This provides a consistent error handling pattern across the codebase.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result returned by the remote API ports, keeping the failure classification typed.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Result returned by domain and application operations that surface typed errors.
pub type AppResult<T> = std::result::Result<T, crate::shared::error::ArkitectoError>;
