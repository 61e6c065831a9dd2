mod confirmation;
mod progress_reporter;
pub mod project_view;
pub mod suggestion_view;

pub use confirmation::{AssumeYes, StdinConfirmation};
pub use progress_reporter::StderrProgressReporter;
pub use project_view::{render_project, render_project_list};
pub use suggestion_view::render_suggestions;
