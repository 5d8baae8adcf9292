//! Users, vehicles and parking lots

mod service;

pub use service::DirectoryService;
