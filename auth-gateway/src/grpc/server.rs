/// gRPC server implementation for auth-gateway
///
/// Implements all RPCs from auth_gateway.proto:
/// - Authentication: AttemptLogin, RefreshToken
/// - Identity: GetProfile
///
/// Every handler starts by consulting the authorization gate with its own
/// full method name; the gate decides exemption and runs the authenticate
/// procedure for everything else. The handlers themselves are thin wrappers
/// over the loginsrv bridge, since each operation is exactly one backend
/// round-trip.
use crate::auth::AuthGate;
use crate::http::{LoginsrvClient, UserInfo};
use grpc_token_propagation::token_from_metadata;
use tonic::{Request, Response, Status};

// Import generated protobuf types
pub mod gateway {
    pub mod auth {
        tonic::include_proto!("gateway.auth");
    }
}

use gateway::auth::auth_server::Auth;
use gateway::auth::{LoginReply, LoginRequest, Profile, ProfileRequest, RefreshRequest};

const ATTEMPT_LOGIN_METHOD: &str = "/gateway.auth.Auth/AttemptLogin";
const REFRESH_TOKEN_METHOD: &str = "/gateway.auth.Auth/RefreshToken";
const GET_PROFILE_METHOD: &str = "/gateway.auth.Auth/GetProfile";

/// Auth gateway gRPC server
#[derive(Clone)]
pub struct AuthGatewayServer {
    bridge: LoginsrvClient,
    gate: AuthGate,
}

impl AuthGatewayServer {
    pub fn new(bridge: LoginsrvClient, gate: AuthGate) -> Self {
        Self { bridge, gate }
    }
}

#[tonic::async_trait]
impl Auth for AuthGatewayServer {
    /// Basic-credential login, proxied to the backend's login endpoint.
    async fn attempt_login(
        &self,
        request: Request<LoginRequest>,
    ) -> std::result::Result<Response<LoginReply>, Status> {
        self.gate
            .authorize(ATTEMPT_LOGIN_METHOD, request.metadata())
            .await?;

        let req = request.into_inner();
        let access_token = self.bridge.login(&req.username, &req.password).await?;

        Ok(Response::new(LoginReply { access_token }))
    }

    /// Exchanges the token carried in call metadata for a fresh one.
    async fn refresh_token(
        &self,
        request: Request<RefreshRequest>,
    ) -> std::result::Result<Response<LoginReply>, Status> {
        self.gate
            .authorize(REFRESH_TOKEN_METHOD, request.metadata())
            .await?;

        let token = token_from_metadata(request.metadata())
            .ok_or_else(|| Status::unauthenticated("Unauthenticated"))?;
        let access_token = self.bridge.refresh(&token).await?;

        Ok(Response::new(LoginReply { access_token }))
    }

    /// Returns the identity record behind the token in call metadata.
    async fn get_profile(
        &self,
        request: Request<ProfileRequest>,
    ) -> std::result::Result<Response<Profile>, Status> {
        self.gate
            .authorize(GET_PROFILE_METHOD, request.metadata())
            .await?;

        let token = token_from_metadata(request.metadata())
            .ok_or_else(|| Status::unauthenticated("Unauthenticated"))?;
        let user = self.bridge.fetch_profile(&token).await?;

        Ok(Response::new(user.into()))
    }
}

impl From<UserInfo> for Profile {
    fn from(user: UserInfo) -> Self {
        Profile {
            sub: user.sub,
            picture: user.picture,
            name: user.name,
            email: user.email,
            origin: user.origin,
            expiry: user.expiry,
            refreshes: user.refreshes,
            domain: user.domain,
            groups: user.groups,
        }
    }
}
