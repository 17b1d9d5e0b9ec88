/// HTTP client module for the identity backend
///
/// Exports:
/// - LoginsrvClient: one-round-trip-per-operation bridge to loginsrv
/// - UserInfo: decoded profile document
pub mod loginsrv;

pub use loginsrv::{LoginsrvClient, UserInfo};
