//! Water meter aggregate

pub mod model;
pub mod repository;

pub use model::{WaterMeter, WaterPoint};
pub use repository::WaterMeterRepository;
