//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `modules`: one module per resource, plus health, metrics and request ids
//! - `router`: assembles the routes and layers

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
