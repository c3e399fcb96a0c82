//! Quiz server entry point.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use quiz_backend::config::AppSettings;
use quiz_backend::inbound::http::health::HealthState;
use quiz_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};

use server::{ServerConfig, build_http_state, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    let http_state = build_http_state(&settings).await?;

    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::new(session, bind_addr),
    )?;
    info!(%bind_addr, "quiz server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
