//! Application settings loaded via OrthoConfig.
//!
//! Values come from `EVENTHUB_*` environment variables, an optional config
//! file and CLI flags. Everything except the database URL has a default.

use std::net::SocketAddr;

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::otp::DEFAULT_OTP_TTL_SECS;
use crate::domain::{InvalidTransitionPolicy, LeadTransitionPolicy};
use crate::inbound::http::state::ServiceSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    /// The OTP lifetime is zero or too large to represent.
    #[error("otp ttl must be between 1 and {max} seconds, got {value}")]
    OtpTtl { value: u64, max: i64 },
    /// The lead transition mode is unknown.
    #[error(transparent)]
    LeadTransitions(#[from] InvalidTransitionPolicy),
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVENTHUB")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Lifetime of a one-time code in seconds.
    pub otp_ttl_secs: Option<u64>,
    /// `permissive` or `strict` lead status changes.
    pub lead_transitions: Option<String>,
    /// Bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// Apply pending migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Configured listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL with surrounding whitespace removed, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Configured pool size, falling back to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Whether embedded migrations run at startup, defaulting to yes.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Configured bcrypt cost, falling back to the library default.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }

    /// Service tunables derived from the OTP lifetime and lead mode.
    pub fn service_settings(&self) -> Result<ServiceSettings, SettingsError> {
        let ttl_secs = self.otp_ttl_secs.unwrap_or(DEFAULT_OTP_TTL_SECS);
        let max = Duration::MAX.num_seconds();
        let otp_ttl = i64::try_from(ttl_secs)
            .ok()
            .filter(|secs| (1..=max).contains(secs))
            .map(Duration::seconds)
            .ok_or(SettingsError::OtpTtl {
                value: ttl_secs,
                max,
            })?;
        let lead_transitions = match self.lead_transitions.as_deref() {
            Some(raw) => raw.parse::<LeadTransitionPolicy>()?,
            None => LeadTransitionPolicy::default(),
        };
        Ok(ServiceSettings {
            otp_ttl,
            lead_transitions,
        })
    }
}
