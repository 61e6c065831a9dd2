/// Ports: the seams between the application core and the outside world
///
/// Inbound ports are what host shells call (the synchronization controller);
/// outbound ports are what the core calls (project store, analysis service,
/// credentials, console, files).
pub mod inbound;
pub mod outbound;
