//! Builders selecting the repository adapters behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use eventhub::inbound::http::state::{DrivenPorts, HttpState, SecurityPorts, ServiceSettings};
use eventhub::outbound::memory::InMemoryStore;
use eventhub::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselNotificationRepository, DieselOtpRepository,
    DieselPortfolioRepository, DieselQuoteTemplateRepository, DieselSettingsRepository,
    DieselUserRepository,
};

/// Pick Diesel adapters when a pool is available, otherwise the in-memory
/// store.
fn select_ports<Pool>(
    pool: Option<&Pool>,
    security: SecurityPorts,
    with_pool: impl FnOnce(&Pool, SecurityPorts) -> DrivenPorts,
) -> DrivenPorts {
    match pool {
        Some(pool) => with_pool(pool, security),
        None => {
            warn!("no database configured; data is kept in memory and lost on exit");
            DrivenPorts::from_store(Arc::new(InMemoryStore::new()), security)
        }
    }
}

fn diesel_ports(pool: &DbPool, security: SecurityPorts) -> DrivenPorts {
    let accounts = Arc::new(DieselUserRepository::new(pool.clone()));
    DrivenPorts {
        users: accounts.clone(),
        vendors: accounts,
        otp_codes: Arc::new(DieselOtpRepository::new(pool.clone())),
        bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
        quotes: Arc::new(DieselQuoteTemplateRepository::new(pool.clone())),
        portfolio: Arc::new(DieselPortfolioRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
        settings: Arc::new(DieselSettingsRepository::new(pool.clone())),
        security,
    }
}

/// Build the shared HTTP state for the configured storage backend.
pub(super) fn build_http_state(
    pool: Option<&DbPool>,
    security: SecurityPorts,
    services: ServiceSettings,
) -> web::Data<HttpState> {
    let ports = select_ports(pool, security, diesel_ports);
    web::Data::new(HttpState::new(ports, services))
}
