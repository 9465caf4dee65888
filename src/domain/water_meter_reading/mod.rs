//! Water meter reading log

pub mod model;
pub mod repository;

pub use model::WaterMeterReading;
pub use repository::WaterMeterReadingRepository;
