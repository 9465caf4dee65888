//! SeaORM implementation of WaterAccountRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::db_err;
use crate::domain::{DomainResult, WaterAccount, WaterAccountRepository};
use crate::infrastructure::database::entities::water_account;

pub struct SeaOrmWaterAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmWaterAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: water_account::Model) -> WaterAccount {
    WaterAccount {
        id: m.id,
        name: m.name,
        national_id: m.national_id,
        notes: m.notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(account: WaterAccount) -> water_account::ActiveModel {
    water_account::ActiveModel {
        id: Set(account.id),
        name: Set(account.name),
        national_id: Set(account.national_id),
        notes: Set(account.notes),
        created_at: Set(account.created_at),
        updated_at: Set(account.updated_at),
    }
}

#[async_trait]
impl WaterAccountRepository for SeaOrmWaterAccountRepository {
    async fn save(&self, account: WaterAccount) -> DomainResult<()> {
        debug!("Saving water account: {}", account.id);
        domain_to_active(account)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterAccount>> {
        let model = water_account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<WaterAccount>> {
        let models = water_account::Entity::find()
            .order_by_asc(water_account::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
