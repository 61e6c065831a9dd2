/// Mock implementations for testing
mod mock_analysis_service;
mod mock_confirmation;
mod mock_credential_provider;
mod mock_project_store;

pub use mock_analysis_service::MockAnalysisService;
pub use mock_confirmation::MockConfirmation;
pub use mock_credential_provider::MockCredentialProvider;
pub use mock_project_store::MockProjectStore;
