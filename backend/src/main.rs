//! Weather desk entry point: loads configuration, prepares persistence, and
//! serves the pages.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use weatherdesk::inbound::http::health::HealthState;
use weatherdesk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use weatherdesk::outbound::openweather::OpenWeatherHttpSource;
use weatherdesk::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use weatherdesk::settings::{ServerSettings, WeatherSettings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let server_settings = ServerSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load server settings: {e}")))?;
    let mut weather_settings = WeatherSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load weather settings: {e}")))?;

    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(|e| io::Error::other(format!("invalid session configuration: {e}")))?;
    let bind_addr = server_settings.bind_addr().map_err(io::Error::other)?;

    let api_key = weather_settings.take_api_key();
    if api_key.is_none() {
        warn!("OPENWEATHER_API_KEY not set; weather lookups will fail");
    }
    let weather = OpenWeatherHttpSource::new(
        weather_settings.endpoint().map_err(io::Error::other)?,
        api_key,
        weather_settings.timeout(),
        Arc::new(DefaultClock),
    )
    .map_err(|e| io::Error::other(format!("failed to build weather client: {e}")))?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        weather,
    );
    match server_settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(|e| io::Error::other(format!("database migrations failed: {e}")))?;
            let pool_config = PoolConfig::new(url).with_max_size(server_settings.db_pool_size());
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| io::Error::other(format!("database pool: {e}")))?;
            info!("using PostgreSQL record store");
            config = config.with_db_pool(pool);
        }
        None => warn!("WEATHERDESK_DATABASE_URL not set; records are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting weather desk");
    create_server(health_state, config)?.await
}
