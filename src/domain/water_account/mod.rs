//! Water account aggregate

pub mod model;
pub mod repository;

pub use model::WaterAccount;
pub use repository::WaterAccountRepository;
