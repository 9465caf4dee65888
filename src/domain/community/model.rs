//! Community domain entities

use chrono::{DateTime, Utc};

/// Shape of a community's consumption limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitRuleType {
    /// Liters/day per person, scaled by water point population
    PersonBased,
    /// Flat liters/day per household, population ignored
    HouseholdBased,
}

impl LimitRuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonBased => "PERSON_BASED",
            Self::HouseholdBased => "HOUSEHOLD_BASED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PERSON_BASED" => Some(Self::PersonBased),
            "HOUSEHOLD_BASED" => Some(Self::HouseholdBased),
            _ => None,
        }
    }
}

/// Consumption limit rule owned by a community
#[derive(Debug, Clone, Copy)]
pub struct ConsumptionLimitRule {
    pub rule_type: LimitRuleType,
    /// Liters per day (per person or per household depending on the type)
    pub value: f64,
}

impl ConsumptionLimitRule {
    /// Applicable daily limit in liters for a water point.
    pub fn limit_per_day(&self, fixed_population: i32, floating_population: i32) -> f64 {
        match self.rule_type {
            LimitRuleType::PersonBased => {
                self.value * (fixed_population + floating_population) as f64
            }
            LimitRuleType::HouseholdBased => self.value,
        }
    }
}

/// Community that owns zones, water points and the limit rule
#[derive(Debug, Clone)]
pub struct Community {
    pub id: String,
    pub name: String,
    pub limit_rule: ConsumptionLimitRule,
    pub created_at: DateTime<Utc>,
}

impl Community {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        limit_rule: ConsumptionLimitRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            limit_rule,
            created_at: Utc::now(),
        }
    }
}

/// Zone of a community; water points reference their zone
#[derive(Debug, Clone)]
pub struct CommunityZone {
    pub id: String,
    pub community_id: String,
    pub name: String,
}

impl CommunityZone {
    pub fn new(
        id: impl Into<String>,
        community_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            community_id: community_id.into(),
            name: name.into(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
