//! Database entities module

pub mod checkin;
pub mod parking;
pub mod reservation;
pub mod slot;
pub mod user;
pub mod vehicle;

pub use checkin::Entity as Checkin;
pub use parking::Entity as Parking;
pub use reservation::Entity as Reservation;
pub use slot::Entity as Slot;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
