/// Auth Gateway Main Entry Point
///
/// Starts the gRPC server with:
/// - loginsrv HTTP bridge (pooled client, bounded timeout)
/// - per-call authorization gate
/// - gRPC health check protocol
/// - graceful shutdown on Ctrl+C / SIGTERM
use anyhow::{Context, Result};
use auth_gateway::{
    auth::AuthGate,
    config::Settings,
    grpc::{gateway::auth::auth_server::AuthServer, AuthGatewayServer},
    http::LoginsrvClient,
};
use tokio::signal;
use tonic::{metadata::MetadataValue, transport::Server, Request, Status};
use tonic_health::server::health_reporter;
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "auth_gateway=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting auth gateway");

    // Load configuration
    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        backend_url = %settings.backend.base_url,
        "Configuration loaded successfully"
    );

    // Build the bridge, gate, and service
    let bridge =
        LoginsrvClient::new(&settings.backend).context("Failed to build loginsrv client")?;
    let gate = AuthGate::new(bridge.clone(), settings.auth.clone());
    let service = AuthGatewayServer::new(bridge, gate);

    // Setup health reporting
    let (mut health_reporter, health_service) = health_reporter();
    health_reporter
        .set_serving::<AuthServer<AuthGatewayServer>>()
        .await;

    let addr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("Starting gRPC server on {}", addr);

    Server::builder()
        .add_service(health_service)
        .add_service(AuthServer::with_interceptor(
            service,
            correlation_interceptor,
        ))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Auth gateway shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}

/// Ensure every call carries a correlation id for log stitching.
fn correlation_interceptor(mut req: Request<()>) -> Result<Request<()>, Status> {
    const CORRELATION_HEADER: &str = "x-correlation-id";

    if let Some(existing) = req.metadata().get(CORRELATION_HEADER) {
        if let Ok(val) = existing.to_str() {
            let stored = val.to_string();
            req.extensions_mut().insert::<String>(stored);
        }
    } else {
        let correlation_id = Uuid::new_v4().to_string();
        let value = MetadataValue::try_from(correlation_id.as_str())
            .map_err(|_| Status::internal("failed to set correlation id"))?;
        req.metadata_mut().insert(CORRELATION_HEADER, value);
    }

    Ok(req)
}
