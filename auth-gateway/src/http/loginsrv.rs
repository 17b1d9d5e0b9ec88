/// loginsrv HTTP bridge
///
/// Translates gateway operations into HTTP round-trips against a loginsrv
/// instance and classifies the outcome. loginsrv serves everything from a
/// single path:
///
/// - Login: POST, url-encoded `username=…&password=…`, 200 body is the token
/// - Refresh: POST, empty body, token attached as `jwt_token` cookie
/// - Profile: GET with `Accept: application/json`, token attached as cookie
///
/// Exactly one round-trip per operation; nothing is retried or cached. The
/// underlying reqwest client pools connections and is safe to share across
/// concurrent calls.
use crate::config::BackendSettings;
use crate::error::{GatewayError, Result};
use reqwest::{header, Client, Method};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const LOGIN_PATH: &str = "/login";
const COOKIE_NAME: &str = "jwt_token";

const ACCEPT_JWT: &str = "application/jwt";
const ACCEPT_JSON: &str = "application/json";

/// Identity backend client
#[derive(Clone)]
pub struct LoginsrvClient {
    http: Client,
    base_url: String,
}

impl LoginsrvClient {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
        })
    }

    /// Exchange username/password for a token. No cookie is attached.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        self.round_trip(
            Method::POST,
            ACCEPT_JWT,
            Some(&[("username", username), ("password", password)]),
            None,
        )
        .await
    }

    /// Exchange the current token for a fresh (possibly identical) one.
    pub async fn refresh(&self, token: &str) -> Result<String> {
        self.round_trip(Method::POST, ACCEPT_JWT, None, Some(token))
            .await
    }

    /// Fetch and decode the identity record behind a token.
    ///
    /// A 200 with an undecodable body is a local failure, never a partially
    /// populated record.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserInfo> {
        let body = self
            .round_trip(Method::GET, ACCEPT_JSON, None, Some(token))
            .await?;

        serde_json::from_str(&body).map_err(|e| GatewayError::MalformedProfile(e.to_string()))
    }

    /// One HTTP round-trip against the backend's login path.
    ///
    /// Status classification:
    /// - 200: success, body is the payload
    /// - 400: `CredentialsRejected`, message = body
    /// - 403: `PermissionDenied`, message = body
    /// - anything else: `Backend`, message = body
    ///
    /// A failure before any response is `Transport`; a body-read failure
    /// after a recognized status is `ResponseRead`.
    async fn round_trip(
        &self,
        method: Method,
        accept: &'static str,
        form: Option<&[(&str, &str)]>,
        cookie: Option<&str>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);

        debug!(method = %method, accept, "Calling identity backend");

        let mut request = self
            .http
            .request(method, &url)
            .header(header::ACCEPT, accept)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

        if let Some(fields) = form {
            request = request.form(fields);
        }
        if let Some(token) = cookie {
            request = request.header(header::COOKIE, format!("{COOKIE_NAME}={token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::ResponseRead(e.to_string()))?;

        match status.as_u16() {
            200 => Ok(body),
            400 => Err(GatewayError::CredentialsRejected(body)),
            403 => Err(GatewayError::PermissionDenied(body)),
            _ => Err(GatewayError::Backend(body)),
        }
    }
}

/// Profile document served by loginsrv.
///
/// Every field may be absent upstream; `sub` is the only one consumers
/// treat as meaningful on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default, rename = "exp")]
    pub expiry: i64,
    #[serde(default, rename = "refs")]
    pub refreshes: i32,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub groups: Vec<String>,
}
