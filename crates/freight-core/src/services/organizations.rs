//! Organization registry service

use super::{upsert, Upserted};
use crate::error::{FreightError, Result};
use crate::ports::Store;
use freight_types::Organization;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct OrganizationService {
    store: Arc<dyn Store<Organization>>,
    write_lock: Mutex<()>,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn Store<Organization>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Organization>> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Organization> {
        if id.is_empty() {
            return Err(FreightError::Validation("ID is required".to_string()));
        }
        debug!("Looking up organization {}", id);
        self.store.find(id).await
    }

    /// Create the organization, or replace the one stored under the same id.
    ///
    /// An organization without an id is given a fresh UUID.
    pub async fn upsert(&self, mut organization: Organization) -> Result<Upserted<Organization>> {
        if organization.id.is_none() {
            let id = uuid::Uuid::new_v4().to_string();
            info!(
                "Assigning id {} to organization with code {}",
                id, organization.code
            );
            organization.id = Some(id);
        }

        let _guard = self.write_lock.lock().await;
        upsert(self.store.as_ref(), organization).await
    }
}
