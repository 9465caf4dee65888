//! SeaORM entity definitions

pub mod community;
pub mod community_zone;
pub mod water_account;
pub mod water_meter;
pub mod water_meter_image;
pub mod water_meter_reading;
pub mod water_meter_reading_image;
