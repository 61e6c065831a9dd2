use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between a request the
/// backend answered but could not fulfil and a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// The operation was understood but produced no usable result
    /// (no budget generated, deletion declined)
    DomainFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DomainFailure => write!(f, "Domain Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors produced by the remote API adapters.
///
/// The variants classify failures structurally so that callers never need
/// to inspect message text to decide whether a failure was transient.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server could not be reached (connection refused, DNS, connect timeout).
    #[error("Network error: {message}")]
    Network { message: String },

    /// A connection was made but no answer arrived within the request timeout.
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {}", detail_or_message(.detail, .message))]
    Application {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// The server answered successfully but the body could not be decoded.
    #[error("Unexpected response from server: {message}")]
    Decode { message: String },
}

fn detail_or_message<'a>(detail: &'a Option<String>, message: &'a str) -> &'a str {
    detail.as_deref().unwrap_or(message)
}

impl ApiError {
    /// True only for connection-level failures; a reachable server returning
    /// an error is never transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// Message to show a user. The server-supplied detail wins over the
    /// transport-level message when present.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Application {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Application { message, .. } => message.clone(),
            ApiError::Network { .. } => {
                "Connection error. Check that the Arkitecto backend is running.".to_string()
            }
            ApiError::Timeout { .. } => {
                "The server took too long to answer. Please try again.".to_string()
            }
            ApiError::Decode { message } => message.clone(),
        }
    }

    /// The server-supplied detail string, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Application { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Application-specific errors.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum ArkitectoError {
    /// Client-side validation failure. Never reaches the network.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Could not generate a budget for this request\n\n💡 Hint: Try a more specific instruction (materials, dimensions, quantities)")]
    NoBudgetGenerated,

    /// The backend answered but reported the analysis as failed.
    #[error("{message}")]
    AnalysisRejected { message: String },

    #[error("Not signed in\n\n💡 Hint: Set ARKITECTO_TOKEN or point ARKITECTO_TOKEN_FILE at a file containing your session token")]
    NotAuthenticated,

    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    #[error("Deletion of project {id} was not confirmed")]
    ConfirmationDeclined { id: String },

    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Invalid configuration file: {path}\nDetails: {details}\n\n💡 Hint: Check the YAML syntax and the value ranges in arkitecto.config.yml")]
    InvalidConfig { path: PathBuf, details: String },
}

impl ArkitectoError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ArkitectoError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Maps the error to the exit code the CLI reports.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ArkitectoError::NoBudgetGenerated | ArkitectoError::ConfirmationDeclined { .. } => {
                ExitCode::DomainFailure
            }
            ArkitectoError::Validation { .. } => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
    }
}
