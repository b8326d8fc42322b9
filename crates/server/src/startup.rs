use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ConventionsConfig};
use conventions::{Container, MatchMode, NamingRule, ServiceValidator};
use service::users::repository::{memory::InMemoryUserRepository, UserRepository};
use service::UserService;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::controllers::UserController;
use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Turn the `[conventions]` section into the validator every controller uses.
pub fn validator_from_config(cfg: &ConventionsConfig) -> Result<ServiceValidator, StartupError> {
    let mode: MatchMode = cfg.match_mode.parse().map_err(StartupError::InvalidConfig)?;
    Ok(ServiceValidator::new(NamingRule::new(cfg.marker.clone(), mode)))
}

/// Register every service and plain value the application resolves at runtime.
pub fn build_container() -> Arc<Container> {
    let container = Arc::new(Container::new());
    let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
    container.bind_instance(UserController::SERVICE_KEY, Arc::new(UserService::new(repo)));
    container.bind_value("app.version", env!("CARGO_PKG_VERSION"));
    container
}

/// Construct all controllers; any rejected dependency aborts startup.
pub fn build_state(container: Arc<Container>, validator: ServiceValidator) -> Result<AppState, StartupError> {
    let users = UserController::from_container(&container, validator.clone())
        .map_err(|source| StartupError::Controller { controller: "users", source })?;
    info!(controller = "users", rule = %validator.rule(), "controller ready");
    Ok(AppState { users: Arc::new(users), container, validator })
}

/// Build the router for an already-wired container.
pub fn build_app(container: Arc<Container>, validator: ServiceValidator) -> Result<Router, StartupError> {
    let state = build_state(container, validator)?;
    Ok(routes::build_router(state, build_cors()))
}

/// Defaults from `AppConfig::default()`, overridden by `SERVER_HOST` / `SERVER_PORT` when set.
fn config_with_env_overrides(host: Option<String>, port: Option<String>) -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Some(host) = host {
        cfg.server.host = host;
    }
    if let Some(port) = port.and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg
}

fn load_config() -> AppConfig {
    match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config not loaded; using defaults and env overrides");
            config_with_env_overrides(env::var("SERVER_HOST").ok(), env::var("SERVER_PORT").ok())
        }
    }
}

/// Public entry: build the app and run the HTTP server.
///
/// Expects `.env` and logging to be set up by the caller.
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config();
    let validator = validator_from_config(&cfg.conventions)?;
    let app = build_app(build_container(), validator)?;

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c handler unavailable; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
