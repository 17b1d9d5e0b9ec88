use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures the gateway can surface to an RPC caller.
///
/// Backend-originated rejections keep the backend's raw response body as
/// their message; it is propagated verbatim on the wire.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Backend answered 400: request body or credentials are malformed.
    #[error("{0}")]
    CredentialsRejected(String),

    /// Backend answered 403: credential invalid or expired.
    #[error("{0}")]
    PermissionDenied(String),

    /// Backend answered with a status the gateway does not recognize.
    #[error("{0}")]
    Backend(String),

    /// Request never produced a response (connect, timeout).
    #[error("Backend request failed: {0}")]
    Transport(String),

    /// Response body could not be read after a recognized status.
    #[error("Failed to read backend response: {0}")]
    ResponseRead(String),

    /// Profile document could not be decoded.
    #[error("Failed to decode profile: {0}")]
    MalformedProfile(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            GatewayError::Unauthenticated => {
                Status::new(Code::Unauthenticated, "Unauthenticated")
            }
            GatewayError::CredentialsRejected(body) => {
                Status::new(Code::InvalidArgument, body.clone())
            }
            GatewayError::PermissionDenied(body) => {
                Status::new(Code::PermissionDenied, body.clone())
            }
            GatewayError::Backend(body) => Status::new(Code::Unknown, body.clone()),
            GatewayError::Transport(_) => Status::new(Code::Unknown, self.to_string()),
            GatewayError::ResponseRead(_)
            | GatewayError::MalformedProfile(_)
            | GatewayError::Configuration(_) => Status::new(Code::Internal, self.to_string()),
        }
    }
}

// gRPC Status conversion
impl From<GatewayError> for Status {
    fn from(err: GatewayError) -> Self {
        err.to_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_maps_to_unauthenticated() {
        let status = GatewayError::Unauthenticated.to_status();
        assert_eq!(status.code(), Code::Unauthenticated);
        assert_eq!(status.message(), "Unauthenticated");
    }

    #[test]
    fn rejected_credentials_keep_backend_body() {
        let status = GatewayError::CredentialsRejected("bad form".into()).to_status();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "bad form");
    }

    #[test]
    fn permission_denied_keeps_backend_body() {
        let status = GatewayError::PermissionDenied("token expired".into()).to_status();
        assert_eq!(status.code(), Code::PermissionDenied);
        assert_eq!(status.message(), "token expired");
    }

    #[test]
    fn unrecognized_status_maps_to_unknown() {
        let status = GatewayError::Backend("teapot".into()).to_status();
        assert_eq!(status.code(), Code::Unknown);
        assert_eq!(status.message(), "teapot");
    }

    #[test]
    fn transport_failure_maps_to_unknown() {
        let status = GatewayError::Transport("connection refused".into()).to_status();
        assert_eq!(status.code(), Code::Unknown);
    }

    #[test]
    fn local_failures_map_to_internal() {
        for err in [
            GatewayError::ResponseRead("eof".into()),
            GatewayError::MalformedProfile("expected value".into()),
            GatewayError::Configuration("missing url".into()),
        ] {
            assert_eq!(err.to_status().code(), Code::Internal);
        }
    }
}
