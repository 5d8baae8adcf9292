//! Users, vehicles and parking lots

pub mod dto;
pub mod handlers;

pub use handlers::*;
