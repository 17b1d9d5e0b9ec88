//! Server-side credential extraction
//!
//! Pulls the bearer token out of incoming gRPC call metadata. Two flavors
//! exist because the gateway needs both: a strict parse that flags
//! structurally broken headers, and a lenient one used as a fallback when a
//! caller attached the token in a non-bearer form.

use crate::{AUTH_TOKEN_METADATA_KEY, BEARER_SCHEME};
use tonic::metadata::MetadataMap;
use tonic::Status;
use tracing::warn;

/// Extract the bearer token from call metadata, strictly.
///
/// The value must be `"<scheme> <token>"` with a case-insensitive `bearer`
/// scheme. The token itself may be empty; callers decide what an empty
/// credential means.
///
/// ## Errors
///
/// Returns `Status::unauthenticated` if:
/// - the `authorization` entry is missing
/// - the value is not valid ASCII
/// - the value has no scheme/token separator
/// - the scheme is not `bearer`
pub fn bearer_token(metadata: &MetadataMap) -> Result<String, Status> {
    let header = metadata.get(AUTH_TOKEN_METADATA_KEY).ok_or_else(|| {
        warn!("Missing authorization metadata");
        Status::unauthenticated("Request unauthenticated with bearer")
    })?;

    let value = header.to_str().map_err(|_| {
        warn!("Invalid authorization metadata encoding");
        Status::unauthenticated("Invalid authorization header encoding")
    })?;

    let (scheme, token) = value.split_once(' ').ok_or_else(|| {
        warn!("Authorization value has no scheme prefix");
        Status::unauthenticated("Bad authorization string")
    })?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        warn!(scheme, "Unexpected authorization scheme");
        return Err(Status::unauthenticated("Request unauthenticated with bearer"));
    }

    Ok(token.to_string())
}

/// Extract the token from call metadata, leniently.
///
/// Splits on the first space and takes the remainder, without checking the
/// scheme. A value with no separator is treated as "no usable token" rather
/// than an error. No mutation, no I/O.
pub fn token_from_metadata(metadata: &MetadataMap) -> Option<String> {
    let value = metadata.get(AUTH_TOKEN_METADATA_KEY)?.to_str().ok()?;
    let (_, token) = value.split_once(' ')?;
    Some(token.to_string())
}
