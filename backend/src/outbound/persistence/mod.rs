//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations backed by PostgreSQL through `diesel-async`
//! and a `bb8` pool. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; adapters translate rows into
//! domain types and re-validate stored values on the way out.
//!
//! # Example
//!
//! ```ignore
//! use eventhub::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/eventhub");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_booking_repository;
mod diesel_catalogue_repository;
mod diesel_error_mapping;
mod diesel_notification_repository;
mod diesel_otp_repository;
mod diesel_settings_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_catalogue_repository::{DieselPortfolioRepository, DieselQuoteTemplateRepository};
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_otp_repository::DieselOtpRepository;
pub use diesel_settings_repository::DieselSettingsRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
