//! Server entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use eventhub::config::AppSettings;
use eventhub::inbound::http::health::HealthState;
use eventhub::inbound::http::session_config::fingerprint::key_fingerprint;
use eventhub::inbound::http::session_config::{BuildMode, session_settings_from_env};
use eventhub::inbound::http::state::SecurityPorts;
use eventhub::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use eventhub::outbound::security::{
    BcryptPasswordHasher, LoggingOtpSender, RandomOtpCodeGenerator,
};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;
    let services = settings.service_settings()?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let security = SecurityPorts {
        hasher: Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost())),
        otp_generator: Arc::new(RandomOtpCodeGenerator),
        otp_sender: Arc::new(LoggingOtpSender),
        clock: Arc::new(DefaultClock),
    };
    let mut config = ServerConfig::new(session, bind_addr, security, services);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            run_migrations(database_url)
                .await
                .wrap_err("failed to apply migrations")?;
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(server::build_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await?;
    Ok(())
}
