//! Shipment records

use crate::error::{ValidationError, ValidationResult};
use crate::organization::Organization;
use crate::weight::{TransportPacks, Unit, Weight};
use crate::{optional_str, required_str};
use serde::Serialize;
use serde_json::Value;

/// A shipment, keyed by `reference_id`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "SHIPMENT", rename_all = "camelCase")]
pub struct Shipment {
    pub reference_id: String,
    pub organizations: Vec<Organization>,
    pub estimated_time_arrival: Option<String>,
    pub transport_packs: TransportPacks,
}

impl Shipment {
    pub fn new(reference_id: impl Into<String>, transport_packs: TransportPacks) -> Self {
        Self {
            reference_id: reference_id.into(),
            organizations: Vec::new(),
            estimated_time_arrival: None,
            transport_packs,
        }
    }

    pub fn with_organizations(mut self, organizations: Vec<Organization>) -> Self {
        self.organizations = organizations;
        self
    }

    pub fn with_eta(mut self, eta: impl Into<String>) -> Self {
        self.estimated_time_arrival = Some(eta.into());
        self
    }

    /// Combined weight of every pack, expressed in `unit`.
    pub fn total_weight(&self, unit: Unit) -> Weight {
        self.transport_packs.total(unit)
    }

    /// Build a shipment from an untyped payload.
    ///
    /// `referenceId` and `transportPacks` are required. `organizations` may be
    /// omitted or `null`; its entries may be bare organization codes.
    pub fn from_json(json: &Value) -> ValidationResult<Self> {
        if !json.is_object() {
            return Err(ValidationError::invalid_json());
        }

        let reference_id = required_str(json, "referenceId")?;
        let transport_packs = match json.get("transportPacks") {
            Some(packs) if packs.is_object() => TransportPacks::from_json(packs)?,
            _ => return Err(ValidationError::invalid_json()),
        };
        let organizations = match json.get("organizations") {
            None | Some(Value::Null) => Vec::new(),
            Some(orgs) => Organization::from_json_array(orgs)?,
        };
        let estimated_time_arrival = optional_str(json, "estimatedTimeArrival")?;

        Ok(Self {
            reference_id,
            organizations,
            estimated_time_arrival,
            transport_packs,
        })
    }

    pub fn from_json_array(json: &Value) -> ValidationResult<Vec<Self>> {
        json.as_array()
            .ok_or_else(ValidationError::invalid_json)?
            .iter()
            .map(Self::from_json)
            .collect()
    }
}
