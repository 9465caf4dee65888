//! # Aquameter
//!
//! Community water-utility account service: billed accounts, physical meters
//! at water points, their reading log, and excess-consumption detection
//! against community limit rules.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, value objects and repository traits
//! - **application**: Use cases: reading lifecycle, snapshot recalculation,
//!   meter replacement, owner changes
//! - **infrastructure**: External concerns (database, file storage)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, SeaOrmCommunityLookup, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
