//! Water consumption use cases
//!
//! One component per operation: creation, edit and deletion of readings all
//! route through `LastReadingUpdater`, the single writer of the meter's
//! denormalized last-reading snapshot.

pub mod images;
pub mod last_reading;
pub mod meter_locks;
pub mod meter_replacer;
pub mod owner_changer;
pub mod reading_creator;
pub mod reading_deleter;
pub mod reading_updater;

#[cfg(test)]
pub(crate) mod testing;

pub use images::{ImageOps, NewImage};
pub use last_reading::LastReadingUpdater;
pub use meter_locks::MeterLockRegistry;
pub use meter_replacer::{MeterReplacement, ReplacedMeter, WaterMeterReplacer};
pub use owner_changer::{NewAccount, OwnerChange, WaterMeterOwnerChanger};
pub use reading_creator::{CreatedReading, NewReading, ReadingCreator};
pub use reading_deleter::{DeletedReading, ReadingDeleter};
pub use reading_updater::{ReadingUpdate, ReadingUpdater, UpdatedReading};
