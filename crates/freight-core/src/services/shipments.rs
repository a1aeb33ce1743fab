//! Shipment service: organization reconciliation and weight aggregation

use super::{upsert, Upserted};
use crate::error::{FreightError, Result};
use crate::ports::Store;
use freight_types::{Organization, Shipment, Unit};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Total weight of every transport pack across all shipments
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightAggregate {
    #[serde(serialize_with = "two_decimals")]
    pub total_weight: f64,
    pub unit: Unit,
}

impl WeightAggregate {
    /// The total as presented to clients, e.g. `"7.54"`.
    pub fn formatted_total(&self) -> String {
        format_two_decimals(self.total_weight)
    }
}

/// Round half away from zero to two places.
pub fn format_two_decimals(value: f64) -> String {
    // Adding 0.0 turns a negative zero into a positive one
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{:.2}", rounded)
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_two_decimals(*value))
}

pub struct ShipmentService {
    shipments: Arc<dyn Store<Shipment>>,
    organizations: Arc<dyn Store<Organization>>,
    write_lock: Mutex<()>,
}

impl ShipmentService {
    pub fn new(
        shipments: Arc<dyn Store<Shipment>>,
        organizations: Arc<dyn Store<Organization>>,
    ) -> Self {
        Self {
            shipments,
            organizations,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Shipment>> {
        self.shipments.find_all().await
    }

    pub async fn get(&self, reference_id: &str) -> Result<Shipment> {
        if reference_id.is_empty() {
            return Err(FreightError::Validation(
                "Reference ID is required".to_string(),
            ));
        }
        debug!("Looking up shipment {}", reference_id);
        self.shipments.find(reference_id).await
    }

    /// Reconcile the shipment's organizations, then create it or replace the
    /// one stored under the same reference id.
    pub async fn upsert(&self, mut shipment: Shipment) -> Result<Upserted<Shipment>> {
        let _guard = self.write_lock.lock().await;
        self.reconcile(&mut shipment).await?;
        upsert(self.shipments.as_ref(), shipment).await
    }

    /// Swap every organization reference for the registered organization with
    /// the same code. References with no registered match are left as they are.
    pub async fn reconcile(&self, shipment: &mut Shipment) -> Result<()> {
        if shipment.organizations.is_empty() {
            return Ok(());
        }

        let registered = self.organizations.find_all().await?;
        let mut by_code: HashMap<&str, &Organization> = HashMap::new();
        for org in &registered {
            by_code.entry(org.code.as_str()).or_insert(org);
        }

        for org in shipment.organizations.iter_mut() {
            match by_code.get(org.code.as_str()) {
                Some(canonical) => {
                    debug!(
                        "Shipment {}: resolved organization code {}",
                        shipment.reference_id, org.code
                    );
                    *org = (*canonical).clone();
                }
                None => debug!(
                    "Shipment {}: no registered organization with code {}",
                    shipment.reference_id, org.code
                ),
            }
        }

        Ok(())
    }

    /// Sum every pack of every shipment in the unit named by `unit`.
    pub async fn aggregate_weight(&self, unit: &str) -> Result<WeightAggregate> {
        let unit: Unit = unit
            .parse()
            .map_err(|_| FreightError::Validation("Unit is required".to_string()))?;

        let shipments = self.shipments.find_all().await?;
        let total_weight: f64 = shipments
            .iter()
            .flat_map(|shipment| shipment.transport_packs.nodes.iter())
            .map(|pack| pack.total_weight.value_in(unit))
            .sum();

        info!(
            "Aggregated {} shipments: {} {}",
            shipments.len(),
            total_weight,
            unit
        );
        Ok(WeightAggregate { total_weight, unit })
    }
}
