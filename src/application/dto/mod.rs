/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod export_format;
mod guided_request;
mod share_target;

pub use export_format::{ExportFormat, ExportedDocument};
pub use guided_request::{FinishQuality, GuidedRequest, ProjectKind};
pub use share_target::ShareTarget;
