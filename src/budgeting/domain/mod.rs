pub mod analysis;
pub mod budget_item;
pub mod project;

pub use analysis::{AnalysisResult, CostBreakdown};
pub use budget_item::{BudgetItem, NewBudgetItem, MANUAL_APU_ORIGIN};
pub use project::{
    Budget, Collaborator, CollaboratorRole, Currency, Location, Project, ProjectMetadata,
    ProjectStatus,
};
