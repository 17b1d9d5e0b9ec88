/// Authorization module
///
/// Exports:
/// - AuthGate: per-call authorization check run before every RPC handler
pub mod gate;

pub use gate::AuthGate;
