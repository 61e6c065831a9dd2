pub mod analysis_api_client;
pub mod http;
pub mod project_api_client;

pub use analysis_api_client::AnalysisApiClient;
pub use http::HttpSettings;
pub use project_api_client::ProjectApiClient;
