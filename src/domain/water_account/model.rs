//! Water account domain entity

use chrono::{DateTime, Utc};

/// The billed customer a meter is assigned to
#[derive(Debug, Clone)]
pub struct WaterAccount {
    pub id: String,
    pub name: String,
    /// National identity document of the holder
    pub national_id: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WaterAccount {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        national_id: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            national_id: national_id.into(),
            notes,
            created_at: now,
            updated_at: now,
        }
    }
}
