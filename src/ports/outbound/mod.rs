/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (remote API, credentials, console, etc.).
pub mod analysis_gateway;
pub mod budget_formatter;
pub mod confirmation_prompt;
pub mod credential_provider;
pub mod export_gateway;
pub mod identity_provider;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_repository;

pub use analysis_gateway::{
    AnalysisGateway, AnalysisMetadata, AnalysisPayload, BudgetPayload, HealthStatus, ImageUpload,
    SketchPayload, SuggestionPayload, SuggestionsPayload, PLACEHOLDER_IMAGE_NAME,
};
pub use budget_formatter::{BudgetDocument, BudgetFormatter};
pub use confirmation_prompt::ConfirmationPrompt;
pub use credential_provider::CredentialProvider;
pub use export_gateway::{ExportBudget, ExportData, ExportGateway, ExportMetadata};
pub use identity_provider::{IdentityProvider, SignedInUser};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_repository::{
    MetadataPatch, ProjectDraft, ProjectPatch, ProjectRepository, ProjectUpdate,
};
