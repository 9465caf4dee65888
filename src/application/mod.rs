pub mod water;

pub use water::{
    ImageOps, LastReadingUpdater, MeterLockRegistry, NewImage, ReadingCreator, ReadingDeleter,
    ReadingUpdater, WaterMeterOwnerChanger, WaterMeterReplacer,
};
