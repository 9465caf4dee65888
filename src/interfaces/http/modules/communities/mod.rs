//! Community module — communities, zones and their limit rules

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
