//! Client-side token interceptor
//!
//! Attaches the caller's current token to every outgoing gRPC request. The
//! token is supplied by a [`TokenProvider`] capability injected at
//! construction; the interceptor itself carries no mutable state and makes
//! no decisions beyond "is a token currently available".

use crate::{AUTH_TOKEN_METADATA_KEY, BEARER_SCHEME};
use std::sync::{Arc, PoisonError, RwLock};
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Capability yielding the caller's current token.
///
/// The caller is responsible for updating the underlying value after a
/// successful login or refresh; see [`SharedToken`] for the common case.
pub trait TokenProvider: Send + Sync {
    /// Returns the current token, if one is known.
    fn current_token(&self) -> Option<String>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn current_token(&self) -> Option<String> {
        (self)()
    }
}

/// Shared, updatable token cell.
///
/// Cloning yields a handle to the same cell, so one clone can live inside a
/// [`TokenClientInterceptor`] while another is updated after login/refresh.
#[derive(Clone, Default)]
pub struct SharedToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token.
    pub fn set(&self, token: impl Into<String>) {
        *self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Forget the current token; subsequent calls go out unauthenticated.
    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl TokenProvider for SharedToken {
    fn current_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Interceptor attaching `"bearer <token>"` to outgoing call metadata.
///
/// Calls go out without an `authorization` entry when the provider has no
/// token (or an empty one), which lets the same client reach exempt methods
/// such as the login method itself.
#[derive(Clone)]
pub struct TokenClientInterceptor<P> {
    provider: P,
}

impl<P: TokenProvider> TokenClientInterceptor<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: TokenProvider> Interceptor for TokenClientInterceptor<P> {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(token) = self.provider.current_token().filter(|t| !t.is_empty()) {
            let value = AsciiMetadataValue::try_from(format!("{BEARER_SCHEME} {token}"))
                .map_err(|_| Status::invalid_argument("token contains non-ASCII characters"))?;
            request.metadata_mut().insert(AUTH_TOKEN_METADATA_KEY, value);
        }
        Ok(request)
    }
}
