/// Auth Gateway Library
///
/// Proxies a cookie/token-based loginsrv HTTP identity backend over gRPC and
/// gates protected methods behind a per-call authorization check.
///
/// ## Modules
///
/// - `auth`: Authorization gate run before every RPC handler
/// - `config`: Service configuration
/// - `error`: Error types and gRPC status mapping
/// - `grpc`: gRPC server implementation
/// - `http`: Identity backend HTTP client
pub mod auth;
pub mod config;
pub mod error;
pub mod grpc;
pub mod http;

// Re-export commonly used types
pub use error::{GatewayError, Result};
pub use grpc::AuthGatewayServer;
