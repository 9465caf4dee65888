//! HTTP REST API interfaces
//!
//! - `common`: response envelope, pagination, validated JSON extractor
//! - `error`: domain error → HTTP status mapping
//! - `modules`: per-resource DTOs and handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod error;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AppState};
