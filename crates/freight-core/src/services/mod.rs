//! Business logic services

pub mod organizations;
pub mod shipments;

pub use organizations::OrganizationService;
pub use shipments::{ShipmentService, WeightAggregate};

use crate::entity::Entity;
use crate::error::{FreightError, Result};
use crate::ports::Store;
use tracing::info;

/// Outcome of a create-or-replace write
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted<T> {
    Created(T),
    Updated(T),
}

impl<T> Upserted<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Upserted::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Upserted::Created(entity) | Upserted::Updated(entity) => entity,
        }
    }
}

/// Replace the entity stored under its own key, or append it if none is.
///
/// Callers serialize calls per table; `exists` and the following write are
/// two separate store operations.
pub(crate) async fn upsert<T: Entity>(store: &dyn Store<T>, entity: T) -> Result<Upserted<T>> {
    let key = entity
        .primary_key()
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FreightError::Validation("Invalid JSON".to_string()))?;

    if store.exists(&key).await? {
        info!("Updating {}={}", T::PRIMARY, key);
        let updated = store.update(&key, entity).await?;
        return Ok(Upserted::Updated(updated));
    }

    info!("Creating {}={}", T::PRIMARY, key);
    store.save(entity.clone()).await?;
    Ok(Upserted::Created(entity))
}
