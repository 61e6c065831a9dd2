/// Use cases module containing application business logic orchestration
mod budget_presenter;
mod generate_sketch;
mod quick_suggestions;
mod sync_controller;

pub use budget_presenter::BudgetPresenter;
pub use generate_sketch::{GeneratedSketch, GenerateSketchUseCase};
pub use quick_suggestions::QuickSuggestionsUseCase;
pub use sync_controller::ProjectSyncController;
