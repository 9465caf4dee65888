//! Reading module — reading log mutations and history

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
