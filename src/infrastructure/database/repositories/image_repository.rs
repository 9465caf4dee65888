//! SeaORM implementations of the image repositories

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::db_err;
use crate::domain::{
    DomainResult, WaterMeterImage, WaterMeterImageRepository, WaterMeterReadingImage,
    WaterMeterReadingImageRepository,
};
use crate::infrastructure::database::entities::{water_meter_image, water_meter_reading_image};

pub struct SeaOrmWaterMeterImageRepository {
    db: DatabaseConnection,
}

impl SeaOrmWaterMeterImageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn meter_image_to_domain(m: water_meter_image::Model) -> WaterMeterImage {
    WaterMeterImage {
        id: m.id,
        water_meter_id: m.water_meter_id,
        url: m.url,
        file_name: m.file_name,
        file_size: m.file_size,
        mime_type: m.mime_type,
        uploaded_at: m.uploaded_at,
        external_key: m.external_key,
    }
}

#[async_trait]
impl WaterMeterImageRepository for SeaOrmWaterMeterImageRepository {
    async fn save(&self, image: WaterMeterImage) -> DomainResult<()> {
        debug!("Saving meter image: {}", image.id);
        let model = water_meter_image::ActiveModel {
            id: Set(image.id),
            water_meter_id: Set(image.water_meter_id),
            url: Set(image.url),
            file_name: Set(image.file_name),
            file_size: Set(image.file_size),
            mime_type: Set(image.mime_type),
            uploaded_at: Set(image.uploaded_at),
            external_key: Set(image.external_key),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Option<WaterMeterImage>> {
        let model = water_meter_image::Entity::find()
            .filter(water_meter_image::Column::WaterMeterId.eq(meter_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(meter_image_to_domain))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        water_meter_image::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

pub struct SeaOrmWaterMeterReadingImageRepository {
    db: DatabaseConnection,
}

impl SeaOrmWaterMeterReadingImageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn reading_image_to_domain(m: water_meter_reading_image::Model) -> WaterMeterReadingImage {
    WaterMeterReadingImage {
        id: m.id,
        water_meter_reading_id: m.water_meter_reading_id,
        url: m.url,
        file_name: m.file_name,
        file_size: m.file_size,
        mime_type: m.mime_type,
        uploaded_at: m.uploaded_at,
        external_key: m.external_key,
    }
}

#[async_trait]
impl WaterMeterReadingImageRepository for SeaOrmWaterMeterReadingImageRepository {
    async fn save(&self, image: WaterMeterReadingImage) -> DomainResult<()> {
        debug!("Saving reading image: {}", image.id);
        let model = water_meter_reading_image::ActiveModel {
            id: Set(image.id),
            water_meter_reading_id: Set(image.water_meter_reading_id),
            url: Set(image.url),
            file_name: Set(image.file_name),
            file_size: Set(image.file_size),
            mime_type: Set(image.mime_type),
            uploaded_at: Set(image.uploaded_at),
            external_key: Set(image.external_key),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_reading(
        &self,
        reading_id: &str,
    ) -> DomainResult<Option<WaterMeterReadingImage>> {
        let model = water_meter_reading_image::Entity::find()
            .filter(water_meter_reading_image::Column::WaterMeterReadingId.eq(reading_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(reading_image_to_domain))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        water_meter_reading_image::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
