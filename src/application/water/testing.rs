//! In-memory fakes and fixtures for use-case tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::domain::{
    Community, CommunityInfo, CommunityLookup, CommunityRepository, CommunityZone,
    CommunityZoneInfo, CommunityZoneRepository, ConsumptionLimitRule, DomainError, DomainResult,
    FileStorage, LimitRuleType, MeasurementUnit, RepositoryProvider, StorageError, StoredObject,
    WaterAccount, WaterAccountRepository, WaterMeter, WaterMeterImage, WaterMeterImageRepository,
    WaterMeterReading, WaterMeterReadingImage, WaterMeterReadingImageRepository,
    WaterMeterReadingRepository, WaterMeterRepository, WaterPoint, WaterPointInfo,
};

/// All-in-one in-memory repository provider
#[derive(Default)]
pub struct InMemoryRepos {
    pub accounts: Mutex<HashMap<String, WaterAccount>>,
    pub meters: Mutex<HashMap<String, WaterMeter>>,
    pub readings: Mutex<Vec<WaterMeterReading>>,
    pub meter_images: Mutex<Vec<WaterMeterImage>>,
    pub reading_images: Mutex<Vec<WaterMeterReadingImage>>,
    pub communities: Mutex<HashMap<String, Community>>,
    pub zones: Mutex<HashMap<String, CommunityZone>>,
}

impl InMemoryRepos {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl WaterAccountRepository for InMemoryRepos {
    async fn save(&self, account: WaterAccount) -> DomainResult<()> {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.id.clone(), account);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterAccount>> {
        Ok(self.accounts.lock().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<WaterAccount>> {
        Ok(self.accounts.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl WaterMeterRepository for InMemoryRepos {
    async fn save(&self, meter: WaterMeter) -> DomainResult<()> {
        self.meters.lock().unwrap().insert(meter.id.clone(), meter);
        Ok(())
    }

    async fn update(&self, meter: WaterMeter) -> DomainResult<()> {
        let mut meters = self.meters.lock().unwrap();
        if !meters.contains_key(&meter.id) {
            return Err(DomainError::NotFound {
                entity: "WaterMeter",
                field: "id",
                value: meter.id,
            });
        }
        meters.insert(meter.id.clone(), meter);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterMeter>> {
        Ok(self.meters.lock().unwrap().get(id).cloned())
    }

    async fn find_by_account(&self, water_account_id: &str) -> DomainResult<Vec<WaterMeter>> {
        Ok(self
            .meters
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.water_account_id == water_account_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<WaterMeter>> {
        Ok(self.meters.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl WaterMeterReadingRepository for InMemoryRepos {
    async fn save(&self, reading: WaterMeterReading) -> DomainResult<()> {
        self.readings.lock().unwrap().push(reading);
        Ok(())
    }

    async fn update(&self, reading: WaterMeterReading) -> DomainResult<()> {
        let mut readings = self.readings.lock().unwrap();
        match readings.iter_mut().find(|r| r.id == reading.id) {
            Some(slot) => {
                *slot = reading;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                entity: "WaterMeterReading",
                field: "id",
                value: reading.id,
            }),
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterMeterReading>> {
        Ok(self
            .readings
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.readings.lock().unwrap().retain(|r| r.id != id);
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
        let mut readings: Vec<WaterMeterReading> = self
            .readings
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.water_meter_id == meter_id)
            .cloned()
            .collect();
        readings.sort_by(|a, b| b.reading_date.cmp(&a.reading_date));
        readings.truncate(n as usize);
        Ok(readings)
    }

    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Vec<WaterMeterReading>> {
        self.find_most_recent(meter_id, u64::MAX).await
    }
}

#[async_trait]
impl WaterMeterImageRepository for InMemoryRepos {
    async fn save(&self, image: WaterMeterImage) -> DomainResult<()> {
        self.meter_images.lock().unwrap().push(image);
        Ok(())
    }

    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Option<WaterMeterImage>> {
        Ok(self
            .meter_images
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.water_meter_id == meter_id)
            .cloned())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.meter_images.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait]
impl WaterMeterReadingImageRepository for InMemoryRepos {
    async fn save(&self, image: WaterMeterReadingImage) -> DomainResult<()> {
        self.reading_images.lock().unwrap().push(image);
        Ok(())
    }

    async fn find_by_reading(
        &self,
        reading_id: &str,
    ) -> DomainResult<Option<WaterMeterReadingImage>> {
        Ok(self
            .reading_images
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.water_meter_reading_id == reading_id)
            .cloned())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.reading_images.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait]
impl CommunityRepository for InMemoryRepos {
    async fn save(&self, community: Community) -> DomainResult<()> {
        self.communities
            .lock()
            .unwrap()
            .insert(community.id.clone(), community);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Community>> {
        Ok(self.communities.lock().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Community>> {
        Ok(self.communities.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl CommunityZoneRepository for InMemoryRepos {
    async fn save(&self, zone: CommunityZone) -> DomainResult<()> {
        self.zones.lock().unwrap().insert(zone.id.clone(), zone);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<CommunityZone>> {
        Ok(self.zones.lock().unwrap().get(id).cloned())
    }

    async fn find_by_community(&self, community_id: &str) -> DomainResult<Vec<CommunityZone>> {
        Ok(self
            .zones
            .lock()
            .unwrap()
            .values()
            .filter(|z| z.community_id == community_id)
            .cloned()
            .collect())
    }
}

impl RepositoryProvider for InMemoryRepos {
    fn water_accounts(&self) -> &dyn WaterAccountRepository {
        self
    }
    fn water_meters(&self) -> &dyn WaterMeterRepository {
        self
    }
    fn readings(&self) -> &dyn WaterMeterReadingRepository {
        self
    }
    fn meter_images(&self) -> &dyn WaterMeterImageRepository {
        self
    }
    fn reading_images(&self) -> &dyn WaterMeterReadingImageRepository {
        self
    }
    fn communities(&self) -> &dyn CommunityRepository {
        self
    }
    fn community_zones(&self) -> &dyn CommunityZoneRepository {
        self
    }
}

/// Lookup fake resolving against the same in-memory stores, mirroring the
/// production database-backed implementation.
pub struct InMemoryLookup {
    repos: Arc<InMemoryRepos>,
}

impl InMemoryLookup {
    pub fn new(repos: Arc<InMemoryRepos>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl CommunityLookup for InMemoryLookup {
    async fn find_water_point(&self, meter_id: &str) -> DomainResult<WaterPointInfo> {
        let meters = self.repos.meters.lock().unwrap();
        let meter = meters.get(meter_id).ok_or_else(|| DomainError::NotFound {
            entity: "WaterPoint",
            field: "meter_id",
            value: meter_id.to_string(),
        })?;
        Ok(WaterPointInfo {
            fixed_population: meter.water_point.fixed_population,
            floating_population: meter.water_point.floating_population,
            community_zone_id: meter.water_point.community_zone_id.clone(),
        })
    }

    async fn find_community_zone(&self, zone_id: &str) -> DomainResult<CommunityZoneInfo> {
        let zones = self.repos.zones.lock().unwrap();
        let zone = zones.get(zone_id).ok_or_else(|| DomainError::NotFound {
            entity: "CommunityZone",
            field: "id",
            value: zone_id.to_string(),
        })?;
        Ok(CommunityZoneInfo {
            community_id: zone.community_id.clone(),
        })
    }

    async fn find_community(&self, community_id: &str) -> DomainResult<CommunityInfo> {
        let communities = self.repos.communities.lock().unwrap();
        let community = communities
            .get(community_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Community",
                field: "id",
                value: community_id.to_string(),
            })?;
        Ok(CommunityInfo {
            limit_rule: community.limit_rule,
        })
    }
}

/// File storage fake; uploads/deletes can be primed to fail.
#[derive(Default)]
pub struct FakeStorage {
    pub fail_uploads: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub uploaded: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    counter: AtomicU64,
}

impl FakeStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl FileStorage for FakeStorage {
    async fn upload(
        &self,
        bytes: &[u8],
        _file_name: &str,
        _mime_type: &str,
        owner_id: &str,
        folder: &str,
    ) -> Result<StoredObject, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Io("simulated upload failure".to_string()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let external_key = format!("{}/{}/{}", folder, owner_id, n);
        self.uploaded.lock().unwrap().push(external_key.clone());
        Ok(StoredObject {
            url: format!("https://files.test/{}", external_key),
            external_key,
            file_size: bytes.len() as i64,
        })
    }

    async fn delete(&self, external_key: &str) -> Result<(), StorageError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("simulated delete failure".to_string()));
        }
        self.deleted.lock().unwrap().push(external_key.to_string());
        Ok(())
    }
}

// ── Fixtures ───────────────────────────────────────────────────

/// Repos seeded with community `C-1` (zone `CZ-1`) carrying the given rule.
pub async fn repos_with_rule(rule_type: LimitRuleType, value: f64) -> Arc<InMemoryRepos> {
    let repos = InMemoryRepos::new();
    repos
        .communities()
        .save(Community::new(
            "C-1",
            "Les Fonts",
            ConsumptionLimitRule { rule_type, value },
        ))
        .await
        .unwrap();
    repos
        .community_zones()
        .save(CommunityZone::new("CZ-1", "C-1", "Zona Nord"))
        .await
        .unwrap();
    repos
}

/// Seed an active liter-unit meter in zone `CZ-1` and return it.
pub async fn meter_with_population(
    repos: &Arc<InMemoryRepos>,
    id: &str,
    fixed: i32,
    floating: i32,
) -> WaterMeter {
    let meter = WaterMeter::new(
        id,
        format!("Meter {}", id),
        "WA-1",
        MeasurementUnit::Liters,
        WaterPoint {
            name: format!("Point {}", id),
            location: "Carrer Major 12".to_string(),
            fixed_population: fixed,
            floating_population: floating,
            cadastral_reference: "9872023VH5797S".to_string(),
            community_zone_id: "CZ-1".to_string(),
            notes: None,
        },
    );
    repos.water_meters().save(meter.clone()).await.unwrap();
    meter
}

/// Reading with the given normalized value dated `days_ago` days in the past.
pub fn reading_days_ago(meter_id: &str, normalized: f64, days_ago: i64) -> WaterMeterReading {
    WaterMeterReading::new(
        format!("R-{}-{}", meter_id, days_ago),
        meter_id,
        Decimal::from_f64(normalized).unwrap_or_default(),
        normalized,
        Utc::now() - Duration::days(days_ago),
        None,
    )
}
