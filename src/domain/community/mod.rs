//! Community aggregate and rule lookup contract

pub mod lookup;
pub mod model;
pub mod repository;

pub use lookup::{CommunityInfo, CommunityLookup, CommunityZoneInfo, WaterPointInfo};
pub use model::{Community, CommunityZone, ConsumptionLimitRule, LimitRuleType};
pub use repository::{CommunityRepository, CommunityZoneRepository};
