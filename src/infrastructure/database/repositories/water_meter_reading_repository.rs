//! SeaORM implementation of WaterMeterReadingRepository

use std::str::FromStr;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, WaterMeterReading, WaterMeterReadingRepository,
};
use crate::infrastructure::database::entities::water_meter_reading;

pub struct SeaOrmWaterMeterReadingRepository {
    db: DatabaseConnection,
}

impl SeaOrmWaterMeterReadingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: water_meter_reading::Model) -> DomainResult<WaterMeterReading> {
    let reading = Decimal::from_str(&m.reading).map_err(|e| {
        DomainError::Storage(format!("stored reading '{}' is not a decimal: {}", m.reading, e))
    })?;
    Ok(WaterMeterReading {
        id: m.id,
        water_meter_id: m.water_meter_id,
        reading,
        normalized_reading: m.normalized_reading,
        reading_date: m.reading_date,
        notes: m.notes,
        created_at: m.created_at,
    })
}

fn domain_to_active(reading: WaterMeterReading) -> water_meter_reading::ActiveModel {
    water_meter_reading::ActiveModel {
        id: Set(reading.id),
        water_meter_id: Set(reading.water_meter_id),
        reading: Set(reading.reading.to_string()),
        normalized_reading: Set(reading.normalized_reading),
        reading_date: Set(reading.reading_date),
        notes: Set(reading.notes),
        created_at: Set(reading.created_at),
    }
}

// ── WaterMeterReadingRepository impl ────────────────────────────

#[async_trait]
impl WaterMeterReadingRepository for SeaOrmWaterMeterReadingRepository {
    async fn save(&self, reading: WaterMeterReading) -> DomainResult<()> {
        debug!(
            "Saving reading {} for meter {}",
            reading.id, reading.water_meter_id
        );
        domain_to_active(reading)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, reading: WaterMeterReading) -> DomainResult<()> {
        debug!("Updating reading: {}", reading.id);

        let exists = water_meter_reading::Entity::find_by_id(reading.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::NotFound {
                entity: "WaterMeterReading",
                field: "id",
                value: reading.id,
            });
        }

        domain_to_active(reading)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterMeterReading>> {
        let model = water_meter_reading::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting reading: {}", id);
        water_meter_reading::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_last_reading(&self, meter_id: &str) -> DomainResult<Option<WaterMeterReading>> {
        Ok(self.find_most_recent(meter_id, 1).await?.into_iter().next())
    }

    async fn find_most_recent(
        &self,
        meter_id: &str,
        n: u64,
    ) -> DomainResult<Vec<WaterMeterReading>> {
        let models = water_meter_reading::Entity::find()
            .filter(water_meter_reading::Column::WaterMeterId.eq(meter_id))
            .order_by_desc(water_meter_reading::Column::ReadingDate)
            .limit(n)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Vec<WaterMeterReading>> {
        let models = water_meter_reading::Entity::find()
            .filter(water_meter_reading::Column::WaterMeterId.eq(meter_id))
            .order_by_desc(water_meter_reading::Column::ReadingDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
