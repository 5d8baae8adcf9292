//! # Parking Service
//!
//! Slot reservations, check-in/check-out with overstay fines, and the
//! supporting directory of users, vehicles, parking lots and slots.
//!
//! ## Architecture
//!
//! - **domain**: entities, repository ports and the error type
//! - **application**: reservation, check-in, slot and directory services
//! - **infrastructure**: SeaORM database and the in-memory store
//! - **interfaces**: REST API
//! - **server**: runtime lifecycle (store, services, API, shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, InMemoryStore};

// Re-export API router
pub use interfaces::http::create_api_router;
