//! Check-in repository interface

use async_trait::async_trait;

use super::model::Checkin;
use crate::domain::DomainResult;

#[async_trait]
pub trait CheckinRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Checkin>>;

    /// All check-ins of a vehicle, open and closed, oldest first
    async fn find_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Checkin>>;
}
