/// Application layer - Use cases and DTOs
///
/// This layer contains the application logic that orchestrates
/// budgeting services and coordinates with infrastructure through ports.
pub mod dto;
pub mod session_gate;
pub mod use_cases;

pub use session_gate::{SessionGate, SessionState};
