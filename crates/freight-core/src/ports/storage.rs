//! Storage trait for persistence

use crate::entity::Entity;
use crate::Result;
use async_trait::async_trait;

/// A table of one entity type, addressed by its primary key.
///
/// Lookups that find nothing fail with [`FreightError::NotFound`](crate::FreightError::NotFound).
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    /// Append without checking for an existing key.
    async fn save(&self, entity: T) -> Result<()>;
    async fn exists(&self, key: &str) -> Result<bool>;
    /// First entity whose primary key equals `key`.
    async fn find(&self, key: &str) -> Result<T>;
    /// Snapshot of every entity in insertion order.
    async fn find_all(&self) -> Result<Vec<T>>;
    /// First entity whose `field` equals `value`.
    async fn find_by(&self, field: &str, value: &str) -> Result<T>;
    /// Replace, in place, the entity currently stored under `key`.
    ///
    /// `entity` may carry a different key than `key`.
    async fn update(&self, key: &str, entity: T) -> Result<T>;
    async fn delete(&self, key: &str) -> Result<T>;
}
