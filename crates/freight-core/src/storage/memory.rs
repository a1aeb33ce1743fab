//! In-memory table backing every entity type

use crate::entity::Entity;
use crate::error::{FreightError, Result};
use crate::ports::Store;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Insertion-ordered table of one entity type.
///
/// The lock is taken once per operation and never held across an await, so
/// every operation is atomic against the table.
pub struct MemoryStore<T: Entity> {
    primary: &'static str,
    data: RwLock<Vec<T>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            primary: T::PRIMARY,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Name of the field this table is keyed on
    pub fn primary(&self) -> &'static str {
        self.primary
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    fn position(data: &[T], key: &str) -> Option<usize> {
        data.iter().position(|entity| entity.has_key(key))
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn save(&self, entity: T) -> Result<()> {
        let mut data = self.data.write().await;
        debug!(
            "Appending {}={:?} ({} stored)",
            self.primary,
            entity.primary_key(),
            data.len()
        );
        data.push(entity);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let data = self.data.read().await;
        Ok(Self::position(&data, key).is_some())
    }

    async fn find(&self, key: &str) -> Result<T> {
        let data = self.data.read().await;
        Self::position(&data, key)
            .map(|index| data[index].clone())
            .ok_or_else(|| FreightError::primary_key_not_found(key))
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        Ok(self.data.read().await.clone())
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<T> {
        let data = self.data.read().await;
        data.iter()
            .find(|entity| entity.field(field).as_deref() == Some(value))
            .cloned()
            .ok_or_else(|| FreightError::field_not_found(field, value))
    }

    async fn update(&self, key: &str, entity: T) -> Result<T> {
        let mut data = self.data.write().await;
        let index =
            Self::position(&data, key).ok_or_else(|| FreightError::primary_key_not_found(key))?;
        debug!("Replacing {}={} at position {}", self.primary, key, index);
        data[index] = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, key: &str) -> Result<T> {
        let mut data = self.data.write().await;
        let index =
            Self::position(&data, key).ok_or_else(|| FreightError::primary_key_not_found(key))?;
        debug!("Removing {}={} at position {}", self.primary, key, index);
        Ok(data.remove(index))
    }
}
