pub mod database;
pub mod storage;

pub use database::{
    init_database, DatabaseConfig, SeaOrmCommunityLookup, SeaOrmRepositoryProvider,
};
pub use storage::{InMemoryFileStorage, LocalFileStorage};
