//! SeaORM implementation of WaterMeterRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, MeasurementUnit, WaterMeter, WaterMeterRepository, WaterPoint,
};
use crate::infrastructure::database::entities::water_meter;

pub struct SeaOrmWaterMeterRepository {
    db: DatabaseConnection,
}

impl SeaOrmWaterMeterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: water_meter::Model) -> DomainResult<WaterMeter> {
    let measurement_unit = MeasurementUnit::parse(&m.measurement_unit)?;
    Ok(WaterMeter {
        id: m.id,
        name: m.name,
        water_account_id: m.water_account_id,
        measurement_unit,
        water_point: WaterPoint {
            name: m.water_point_name,
            location: m.location,
            fixed_population: m.fixed_population,
            floating_population: m.floating_population,
            cadastral_reference: m.cadastral_reference,
            community_zone_id: m.community_zone_id,
            notes: m.water_point_notes,
        },
        is_active: m.is_active,
        last_reading_normalized_value: m.last_reading_normalized_value,
        last_reading_date: m.last_reading_date,
        last_reading_excess_consumption: m.last_reading_excess_consumption,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(meter: WaterMeter) -> water_meter::ActiveModel {
    water_meter::ActiveModel {
        id: Set(meter.id),
        name: Set(meter.name),
        water_account_id: Set(meter.water_account_id),
        measurement_unit: Set(meter.measurement_unit.as_str().to_string()),
        water_point_name: Set(meter.water_point.name),
        location: Set(meter.water_point.location),
        fixed_population: Set(meter.water_point.fixed_population),
        floating_population: Set(meter.water_point.floating_population),
        cadastral_reference: Set(meter.water_point.cadastral_reference),
        community_zone_id: Set(meter.water_point.community_zone_id),
        water_point_notes: Set(meter.water_point.notes),
        is_active: Set(meter.is_active),
        last_reading_normalized_value: Set(meter.last_reading_normalized_value),
        last_reading_date: Set(meter.last_reading_date),
        last_reading_excess_consumption: Set(meter.last_reading_excess_consumption),
        created_at: Set(meter.created_at),
        updated_at: Set(meter.updated_at),
    }
}

// ── WaterMeterRepository impl ───────────────────────────────────

#[async_trait]
impl WaterMeterRepository for SeaOrmWaterMeterRepository {
    async fn save(&self, meter: WaterMeter) -> DomainResult<()> {
        debug!("Saving water meter: {}", meter.id);
        domain_to_active(meter)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, meter: WaterMeter) -> DomainResult<()> {
        debug!("Updating water meter: {}", meter.id);

        let exists = water_meter::Entity::find_by_id(meter.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::NotFound {
                entity: "WaterMeter",
                field: "id",
                value: meter.id,
            });
        }

        domain_to_active(meter)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterMeter>> {
        let model = water_meter::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_account(&self, water_account_id: &str) -> DomainResult<Vec<WaterMeter>> {
        let models = water_meter::Entity::find()
            .filter(water_meter::Column::WaterAccountId.eq(water_account_id))
            .order_by_asc(water_meter::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_all(&self) -> DomainResult<Vec<WaterMeter>> {
        let models = water_meter::Entity::find()
            .order_by_asc(water_meter::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
