//! Water account repository interface

use async_trait::async_trait;

use super::model::WaterAccount;
use crate::domain::DomainResult;

#[async_trait]
pub trait WaterAccountRepository: Send + Sync {
    async fn save(&self, account: WaterAccount) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterAccount>>;
    async fn find_all(&self) -> DomainResult<Vec<WaterAccount>>;
}
