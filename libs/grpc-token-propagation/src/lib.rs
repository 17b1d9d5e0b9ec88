//! Bearer-token propagation for the auth gateway's gRPC surface.
//!
//! The gateway and its clients share one wire contract: an opaque token
//! carried in the `authorization` call metadata as `"bearer <token>"`. This
//! crate owns both sides of it:
//!
//! - [`server`]: extracting the credential from incoming call metadata
//! - [`client`]: attaching the caller's current token to outgoing calls
//!
//! Tokens are treated as opaque strings end to end. Nothing here parses,
//! verifies, or stores them; trust decisions belong to the identity backend.

pub mod client;
pub mod server;

/// Metadata key carrying the bearer credential on every call.
pub const AUTH_TOKEN_METADATA_KEY: &str = "authorization";

/// Scheme expected in the `authorization` metadata value. Matched
/// case-insensitively on the server side.
pub const BEARER_SCHEME: &str = "bearer";

pub use client::{SharedToken, TokenClientInterceptor, TokenProvider};
pub use server::{bearer_token, token_from_metadata};
