//! Community repository interfaces

use async_trait::async_trait;

use super::model::{Community, CommunityZone};
use crate::domain::DomainResult;

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn save(&self, community: Community) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Community>>;
    async fn find_all(&self) -> DomainResult<Vec<Community>>;
}

#[async_trait]
pub trait CommunityZoneRepository: Send + Sync {
    async fn save(&self, zone: CommunityZone) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<CommunityZone>>;
    async fn find_by_community(&self, community_id: &str) -> DomainResult<Vec<CommunityZone>>;
}
