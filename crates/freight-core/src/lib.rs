//! Freight Core Library
//!
//! Storage port, generic in-memory store and the domain services that sit on
//! top of it.

// Re-export pure types from freight-types
pub use freight_types::*;

pub mod entity;
pub mod error;
pub mod ports;
pub mod services;
pub mod storage;

pub use entity::Entity;
pub use error::{FreightError, Result};
pub use ports::Store;
pub use services::{OrganizationService, ShipmentService, Upserted, WeightAggregate};
pub use storage::MemoryStore;
