//! SeaORM implementation of DirectoryRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::db_err;
use crate::domain::directory::{
    DirectoryRepository, NewParking, NewUser, NewVehicle, Parking, User, Vehicle,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{checkin, parking, reservation, slot, user, vehicle};

pub struct SeaOrmDirectoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmDirectoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_user(&self, id: i32) -> DomainResult<()> {
        match user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("User", id)),
        }
    }
}

/// Remove the slots of the given parking lots together with their
/// reservations and check-ins.
async fn delete_parking_rows(txn: &DatabaseTransaction, parking_ids: Vec<i32>) -> DomainResult<()> {
    if parking_ids.is_empty() {
        return Ok(());
    }
    let slot_ids: Vec<i32> = slot::Entity::find()
        .filter(slot::Column::ParkingId.is_in(parking_ids.clone()))
        .all(txn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|s| s.id)
        .collect();

    if !slot_ids.is_empty() {
        reservation::Entity::delete_many()
            .filter(reservation::Column::SlotId.is_in(slot_ids.clone()))
            .exec(txn)
            .await
            .map_err(db_err)?;
        checkin::Entity::delete_many()
            .filter(checkin::Column::SlotId.is_in(slot_ids))
            .exec(txn)
            .await
            .map_err(db_err)?;
    }
    slot::Entity::delete_many()
        .filter(slot::Column::ParkingId.is_in(parking_ids.clone()))
        .exec(txn)
        .await
        .map_err(db_err)?;
    parking::Entity::delete_many()
        .filter(parking::Column::Id.is_in(parking_ids))
        .exec(txn)
        .await
        .map_err(db_err)?;
    Ok(())
}

/// Remove the given vehicles together with their reservations and check-ins.
async fn delete_vehicle_rows(txn: &DatabaseTransaction, vehicle_ids: Vec<i32>) -> DomainResult<()> {
    if vehicle_ids.is_empty() {
        return Ok(());
    }
    reservation::Entity::delete_many()
        .filter(reservation::Column::VehicleId.is_in(vehicle_ids.clone()))
        .exec(txn)
        .await
        .map_err(db_err)?;
    checkin::Entity::delete_many()
        .filter(checkin::Column::VehicleId.is_in(vehicle_ids.clone()))
        .exec(txn)
        .await
        .map_err(db_err)?;
    vehicle::Entity::delete_many()
        .filter(vehicle::Column::Id.is_in(vehicle_ids))
        .exec(txn)
        .await
        .map_err(db_err)?;
    Ok(())
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        full_name: m.full_name,
        email: m.email,
        phone_number: m.phone_number,
        role: m.role.into(),
        created_at: m.created_at,
    }
}

fn vehicle_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        user_id: m.user_id,
        vehicle_type: m.vehicle_type.into(),
        plate_number: m.plate_number,
        color: m.color,
        model: m.model,
        created_at: m.created_at,
    }
}

fn parking_to_domain(m: parking::Model) -> Parking {
    Parking {
        id: m.id,
        owner_id: m.owner_id,
        name: m.name,
        address: m.address,
        is_open: m.is_open,
        total_capacity: m.total_capacity,
        hourly_rate: m.hourly_rate,
        latitude: m.latitude,
        longitude: m.longitude,
        created_at: m.created_at,
    }
}

// ── DirectoryRepository impl ────────────────────────────────────

#[async_trait]
impl DirectoryRepository for SeaOrmDirectoryRepository {
    async fn create_user(&self, new: NewUser) -> DomainResult<User> {
        let model = user::ActiveModel {
            full_name: Set(new.full_name),
            email: Set(new.email),
            phone_number: Set(new.phone_number),
            role: Set(new.role.into()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        debug!(user_id = saved.id, "User created");
        Ok(user_to_domain(saved))
    }

    async fn find_user(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_to_domain))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(user_to_domain).collect())
    }

    async fn update_user(&self, u: User) -> DomainResult<User> {
        let existing = user::Entity::find_by_id(u.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", u.id))?;

        let mut model = existing.into_active_model();
        model.full_name = Set(u.full_name);
        model.email = Set(u.email);
        model.phone_number = Set(u.phone_number);
        model.role = Set(u.role.into());
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(user_to_domain(saved))
    }

    async fn delete_user(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let vehicle_ids: Vec<i32> = vehicle::Entity::find()
            .filter(vehicle::Column::UserId.eq(id))
            .all(&txn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|v| v.id)
            .collect();
        let parking_ids: Vec<i32> = parking::Entity::find()
            .filter(parking::Column::OwnerId.eq(id))
            .all(&txn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|p| p.id)
            .collect();

        reservation::Entity::delete_many()
            .filter(reservation::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        delete_vehicle_rows(&txn, vehicle_ids).await?;
        delete_parking_rows(&txn, parking_ids).await?;

        let result = user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }

        txn.commit().await.map_err(db_err)?;
        debug!(user_id = id, "User deleted");
        Ok(())
    }

    async fn create_vehicle(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        self.require_user(new.user_id).await?;
        let model = vehicle::ActiveModel {
            user_id: Set(new.user_id),
            vehicle_type: Set(new.vehicle_type.into()),
            plate_number: Set(new.plate_number),
            color: Set(new.color),
            model: Set(new.model),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        debug!(vehicle_id = saved.id, user_id = saved.user_id, "Vehicle created");
        Ok(vehicle_to_domain(saved))
    }

    async fn find_vehicle(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(vehicle_to_domain))
    }

    async fn find_vehicles_by_user(&self, user_id: i32) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::UserId.eq(user_id))
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(vehicle_to_domain).collect())
    }

    async fn update_vehicle(&self, v: Vehicle) -> DomainResult<Vehicle> {
        let existing = vehicle::Entity::find_by_id(v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Vehicle", v.id))?;

        let mut model = existing.into_active_model();
        model.vehicle_type = Set(v.vehicle_type.into());
        model.plate_number = Set(v.plate_number);
        model.color = Set(v.color);
        model.model = Set(v.model);
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(vehicle_to_domain(saved))
    }

    async fn delete_vehicle(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;
        if vehicle::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DomainError::not_found("Vehicle", id));
        }
        delete_vehicle_rows(&txn, vec![id]).await?;
        txn.commit().await.map_err(db_err)?;
        debug!(vehicle_id = id, "Vehicle deleted");
        Ok(())
    }

    async fn create_parking(&self, new: NewParking) -> DomainResult<Parking> {
        self.require_user(new.owner_id).await?;
        let model = parking::ActiveModel {
            owner_id: Set(new.owner_id),
            name: Set(new.name),
            address: Set(new.address),
            is_open: Set(new.is_open),
            total_capacity: Set(new.total_capacity),
            hourly_rate: Set(new.hourly_rate),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        debug!(parking_id = saved.id, "Parking created");
        Ok(parking_to_domain(saved))
    }

    async fn find_parking(&self, id: i32) -> DomainResult<Option<Parking>> {
        let model = parking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(parking_to_domain))
    }

    async fn update_parking(&self, p: Parking) -> DomainResult<Parking> {
        let existing = parking::Entity::find_by_id(p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Parking", p.id))?;

        let mut model = existing.into_active_model();
        model.name = Set(p.name);
        model.address = Set(p.address);
        model.is_open = Set(p.is_open);
        model.total_capacity = Set(p.total_capacity);
        model.hourly_rate = Set(p.hourly_rate);
        model.latitude = Set(p.latitude);
        model.longitude = Set(p.longitude);
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(parking_to_domain(saved))
    }

    async fn delete_parking(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;
        if parking::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DomainError::not_found("Parking", id));
        }
        delete_parking_rows(&txn, vec![id]).await?;
        txn.commit().await.map_err(db_err)?;
        debug!(parking_id = id, "Parking deleted");
        Ok(())
    }
}
