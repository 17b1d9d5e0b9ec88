/// gRPC server module for auth-gateway
///
/// Exports:
/// - AuthGatewayServer: Main gRPC server implementation
/// - gateway: Generated protobuf types from auth_gateway.proto
pub mod server;

pub use server::gateway;
pub use server::AuthGatewayServer;
