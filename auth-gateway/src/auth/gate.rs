//! Authorization gate
//!
//! Runs once per inbound call, before the handler body, and decides whether
//! the call proceeds. Exempt methods pass through untouched; everything else
//! goes through the authenticate procedure.
//!
//! The gate is invoked at the top of every handler rather than through
//! tonic's `Interceptor`, because the sync interceptor API cannot await the
//! backend round-trip the fallback path needs. A presence-only sync check
//! would skip that validation entirely.

use crate::http::LoginsrvClient;
use grpc_token_propagation::{bearer_token, token_from_metadata};
use tonic::metadata::MetadataMap;
use tonic::Status;
use tracing::warn;

use crate::config::AuthSettings;

/// Per-call authorization check.
///
/// Stateless between calls; safe to clone into the service and share across
/// concurrent requests.
#[derive(Clone)]
pub struct AuthGate {
    bridge: LoginsrvClient,
    exempt_methods: Vec<String>,
    validate_every_call: bool,
}

impl AuthGate {
    pub fn new(bridge: LoginsrvClient, settings: AuthSettings) -> Self {
        Self {
            bridge,
            exempt_methods: settings.exempt_methods,
            validate_every_call: settings.validate_every_call,
        }
    }

    /// Decide whether a call to `full_method` may proceed.
    ///
    /// Exempt methods (substring match against the configured list) bypass
    /// the check. The decision is made fresh on every call; nothing is
    /// cached between invocations.
    pub async fn authorize(&self, full_method: &str, metadata: &MetadataMap) -> Result<(), Status> {
        if self.is_exempt(full_method) {
            return Ok(());
        }

        self.authenticate(metadata).await
    }

    fn is_exempt(&self, full_method: &str) -> bool {
        self.exempt_methods
            .iter()
            .any(|method| full_method.contains(method.as_str()))
    }

    /// The authenticate procedure:
    ///
    /// 1. Strict bearer extraction; structural failure rejects immediately.
    /// 2. A non-empty token is trusted on presence, unless
    ///    `validate_every_call` is set.
    /// 3. Otherwise fall back to lenient extraction; nothing found rejects
    ///    with `Unauthenticated`.
    /// 4. A fallback token is validated with a profile round-trip; backend
    ///    failures propagate with their classified status.
    async fn authenticate(&self, metadata: &MetadataMap) -> Result<(), Status> {
        let token = bearer_token(metadata)?;

        if !token.is_empty() && !self.validate_every_call {
            return Ok(());
        }

        let fallback = token_from_metadata(metadata)
            .ok_or_else(|| Status::unauthenticated("Unauthenticated"))?;

        match self.bridge.fetch_profile(&fallback).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Backend rejected credential during call authorization");
                Err(e.into())
            }
        }
    }
}
