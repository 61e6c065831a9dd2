/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the Arkitecto backend,
/// the console and the file system.
pub mod outbound;
