//! Reassign a meter to a different billing account

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, WaterAccount, WaterMeter,
};

/// Details for an account created on the fly during an owner change
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub national_id: String,
    pub notes: Option<String>,
}

/// Either an existing account or the data for a new one
#[derive(Debug, Clone)]
pub struct OwnerChange {
    pub water_account_id: Option<String>,
    pub new_account: Option<NewAccount>,
}

pub struct WaterMeterOwnerChanger {
    repos: Arc<dyn RepositoryProvider>,
}

impl WaterMeterOwnerChanger {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Pure reassignment; readings and the consumption snapshot stay as-is.
    pub async fn change_owner(
        &self,
        meter_id: &str,
        change: OwnerChange,
    ) -> DomainResult<WaterMeter> {
        let mut meter = self
            .repos
            .water_meters()
            .find_by_id(meter_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeter",
                field: "id",
                value: meter_id.to_string(),
            })?;

        let account_id = match (change.water_account_id, change.new_account) {
            (Some(id), _) => {
                self.repos
                    .water_accounts()
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound {
                        entity: "WaterAccount",
                        field: "id",
                        value: id.clone(),
                    })?;
                id
            }
            (None, Some(new_account)) => {
                let account = WaterAccount::new(
                    Uuid::new_v4().to_string(),
                    new_account.name,
                    new_account.national_id,
                    new_account.notes,
                );
                self.repos.water_accounts().save(account.clone()).await?;
                account.id
            }
            (None, None) => {
                return Err(DomainError::Validation(
                    "either an existing water account id or new account details are required"
                        .to_string(),
                ));
            }
        };

        meter.reassign_owner(account_id);
        self.repos.water_meters().update(meter.clone()).await?;

        info!(meter_id, water_account_id = %meter.water_account_id, "Meter owner changed");

        Ok(meter)
    }
}

// ── Tests ──────────────────────────────────────────────────────
