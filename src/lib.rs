//! arkitecto - client for the ARKITECTO AI construction budget service
//!
//! The library keeps a user's saved projects in sync with the remote
//! project store, runs AI budget analyses over site photos and exports
//! the resulting budgets. It follows hexagonal architecture:
//!
//! - **Domain Layer** (`budgeting`): projects, budget lines, tax and retry policies
//! - **Application Layer** (`application`): the synchronization controller,
//!   budget presentation and sketch generation
//! - **Ports** (`ports`): interfaces the application core depends on
//! - **Adapters** (`adapters`): HTTP clients, credentials, console and filesystem
//! - **Shared** (`shared`): error types, result aliases and file safety checks
//!
//! # Example
//!
//! ```no_run
//! use arkitecto::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<()> {
//! let http = HttpSettings::new("http://localhost:8000", Duration::from_secs(60));
//! let credentials: Arc<dyn CredentialProvider> =
//!     Arc::new(StaticCredentialProvider::new(Some("session-token".to_string())));
//!
//! let controller = ProjectSyncController::new(
//!     ProjectApiClient::new(http.clone(), credentials)?,
//!     AnalysisApiClient::new(http)?,
//!     AssumeYes,
//! );
//!
//! controller.initialize().await?;
//! for project in controller.snapshot().projects {
//!     println!("{} {}", project.id, project.title());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod budgeting;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{
        AssumeYes, StderrProgressReporter, StdinConfirmation,
    };
    pub use crate::adapters::outbound::credentials::{
        StaticCredentialProvider, TokenFileCredentialProvider,
    };
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, ImageFileReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::PlainTextBudgetFormatter;
    pub use crate::adapters::outbound::network::{AnalysisApiClient, HttpSettings, ProjectApiClient};
    pub use crate::application::dto::{
        ExportFormat, ExportedDocument, FinishQuality, GuidedRequest, ProjectKind, ShareTarget,
    };
    pub use crate::application::use_cases::{
        BudgetPresenter, GenerateSketchUseCase, GeneratedSketch, ProjectSyncController,
        QuickSuggestionsUseCase,
    };
    pub use crate::application::{SessionGate, SessionState};
    pub use crate::budgeting::domain::{
        AnalysisResult, Budget, BudgetItem, CostBreakdown, NewBudgetItem, Project, ProjectStatus,
    };
    pub use crate::budgeting::policies::{LoadRetryPolicy, TaxPolicy, TaxSummary};
    pub use crate::budgeting::services::{BudgetCalculator, CurrencyFormatter};
    pub use crate::ports::inbound::{AnalysisInput, ProjectSyncPort, SyncSnapshot};
    pub use crate::ports::outbound::{
        AnalysisGateway, BudgetFormatter, ConfirmationPrompt, CredentialProvider, ExportGateway,
        IdentityProvider, ImageUpload, MetadataPatch, OutputPresenter, ProgressReporter, ProjectDraft, ProjectPatch,
        ProjectRepository, ProjectUpdate, SignedInUser, SuggestionPayload,
    };
    pub use crate::shared::error::{ApiError, ArkitectoError};
    pub use crate::shared::{ApiResult, AppResult, Result};
}
