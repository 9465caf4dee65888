//! Water account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::WaterAccount;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWaterAccountRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub national_id: String,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WaterAccountDto {
    pub id: String,
    pub name: String,
    pub national_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WaterAccountDto {
    pub fn from_domain(account: WaterAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
            national_id: account.national_id,
            notes: account.notes,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
