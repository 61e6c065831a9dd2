/// Budgeting domain layer
///
/// Pure business logic: project and budget value objects, budget arithmetic,
/// currency formatting and the tax and retry policies. Nothing in here
/// performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
