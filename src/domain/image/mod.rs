//! Image attachments and the file storage contract

pub mod model;
pub mod repository;
pub mod storage;

pub use model::{WaterMeterImage, WaterMeterReadingImage};
pub use repository::{WaterMeterImageRepository, WaterMeterReadingImageRepository};
pub use storage::{FileStorage, StorageError, StoredObject};
