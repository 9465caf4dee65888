//! Water meter module — CRUD, replacement, owner change

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
