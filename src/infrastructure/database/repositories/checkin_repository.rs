//! SeaORM implementation of CheckinRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::db_err;
use crate::domain::checkin::{Checkin, CheckinRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::checkin;

pub struct SeaOrmCheckinRepository {
    db: DatabaseConnection,
}

impl SeaOrmCheckinRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: checkin::Model) -> Checkin {
    Checkin {
        id: m.id,
        vehicle_id: m.vehicle_id,
        slot_id: m.slot_id,
        entry_time: m.entry_time,
        exit_time: m.exit_time,
        over_stay_fine: m.over_stay_fine,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl CheckinRepository for SeaOrmCheckinRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Checkin>> {
        let model = checkin::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Checkin>> {
        let models = checkin::Entity::find()
            .filter(checkin::Column::VehicleId.eq(vehicle_id))
            .order_by_asc(checkin::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
