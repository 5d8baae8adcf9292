//! SeaORM implementation of SlotRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::db_err;
use crate::domain::slot::{NewSlot, Slot, SlotRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{checkin, parking, reservation, slot};

pub struct SeaOrmSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: slot::Model) -> Slot {
    Slot {
        id: m.id,
        parking_id: m.parking_id,
        code: m.code,
        slot_type: m.slot_type.into(),
        is_available: m.is_available,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl SlotRepository for SeaOrmSlotRepository {
    async fn create(&self, new: NewSlot) -> DomainResult<Slot> {
        let parking = parking::Entity::find_by_id(new.parking_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if parking.is_none() {
            return Err(DomainError::not_found("Parking", new.parking_id));
        }

        let now = Utc::now();
        let model = slot::ActiveModel {
            parking_id: Set(new.parking_id),
            code: Set(new.code),
            slot_type: Set(new.slot_type.into()),
            is_available: Set(new.is_available),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        debug!(slot_id = saved.id, parking_id = saved.parking_id, "Slot created");
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Slot>> {
        let model = slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_parking(&self, parking_id: i32) -> DomainResult<Vec<Slot>> {
        let models = slot::Entity::find()
            .filter(slot::Column::ParkingId.eq(parking_id))
            .order_by_asc(slot::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, s: Slot) -> DomainResult<Slot> {
        let existing = slot::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Slot", s.id))?;

        let mut model = existing.into_active_model();
        model.code = Set(s.code);
        model.slot_type = Set(s.slot_type.into());
        model.updated_at = Set(Utc::now());
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        reservation::Entity::delete_many()
            .filter(reservation::Column::SlotId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        checkin::Entity::delete_many()
            .filter(checkin::Column::SlotId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = slot::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Slot", id));
        }

        txn.commit().await.map_err(db_err)?;
        debug!(slot_id = id, "Slot deleted");
        Ok(())
    }
}
