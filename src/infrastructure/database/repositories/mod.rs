//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories, the transactional unit of work and the
//! unified RepositoryProvider.

pub mod checkin_repository;
pub mod directory_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod slot_repository;
pub mod unit_of_work;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;
use crate::shared::errors::InfraError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::from(e).into()
}
