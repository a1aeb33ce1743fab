//! Weights, units and transport packs

use crate::error::{ValidationError, ValidationResult};
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// Mass units understood by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    Kilograms,
    Pounds,
    Ounces,
}

impl Unit {
    pub const ALL: [Unit; 3] = [Unit::Kilograms, Unit::Pounds, Unit::Ounces];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kilograms => "KILOGRAMS",
            Unit::Pounds => "POUNDS",
            Unit::Ounces => "OUNCES",
        }
    }

    /// Multiplicative factor taking a quantity in `self` to `to`.
    ///
    /// Every pair is a direct path; the table is not derived through a pivot
    /// unit, so `a.factor_to(b) * b.factor_to(a)` is only approximately 1.
    pub fn factor_to(&self, to: Unit) -> f64 {
        match (self, to) {
            (Unit::Kilograms, Unit::Kilograms) => 1.0,
            (Unit::Kilograms, Unit::Pounds) => 2.20462,
            (Unit::Kilograms, Unit::Ounces) => 35.274,
            (Unit::Pounds, Unit::Kilograms) => 0.453592,
            (Unit::Pounds, Unit::Pounds) => 1.0,
            (Unit::Pounds, Unit::Ounces) => 16.0,
            (Unit::Ounces, Unit::Kilograms) => 0.0283495,
            (Unit::Ounces, Unit::Pounds) => 0.0625,
            (Unit::Ounces, Unit::Ounces) => 1.0,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| ValidationError::new(format!("Unknown unit: {}", s)))
    }
}

/// A scalar mass in one unit. Conversions return new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weight {
    #[serde(rename = "weight")]
    pub value: f64,
    pub unit: Unit,
}

impl Weight {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// The scalar this weight amounts to in `unit`. Never rounds.
    pub fn value_in(&self, unit: Unit) -> f64 {
        self.value * self.unit.factor_to(unit)
    }

    pub fn convert(&self, unit: Unit) -> Weight {
        Weight::new(self.value_in(unit), unit)
    }

    /// Parse `{"weight": <number | numeric string>, "unit": <tag>}`.
    pub fn from_json(json: &Value) -> ValidationResult<Self> {
        let value = match json.get("weight") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())
        .ok_or_else(ValidationError::invalid_json)?;

        let unit = match json.get("unit") {
            Some(Value::String(tag)) => tag
                .parse::<Unit>()
                .map_err(|_| ValidationError::invalid_json())?,
            _ => return Err(ValidationError::invalid_json()),
        };

        Ok(Self::new(value, unit))
    }
}

/// One packing unit of a shipment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportPack {
    pub total_weight: Weight,
}

impl TransportPack {
    pub fn new(total_weight: Weight) -> Self {
        Self { total_weight }
    }
}

/// The ordered pack list carried by a shipment, `{"nodes": [...]}` on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransportPacks {
    pub nodes: Vec<TransportPack>,
}

impl TransportPacks {
    pub fn new(nodes: Vec<TransportPack>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of every pack, each converted straight into `unit`.
    pub fn total(&self, unit: Unit) -> Weight {
        let value = self
            .nodes
            .iter()
            .map(|pack| pack.total_weight.value_in(unit))
            .sum();
        Weight::new(value, unit)
    }

    pub fn from_json(json: &Value) -> ValidationResult<Self> {
        let nodes = json
            .get("nodes")
            .and_then(Value::as_array)
            .ok_or_else(ValidationError::invalid_json)?;

        let nodes = nodes
            .iter()
            .map(|node| -> ValidationResult<TransportPack> {
                let weight = node
                    .get("totalWeight")
                    .filter(|w| w.is_object())
                    .ok_or_else(ValidationError::invalid_json)?;
                Ok(TransportPack::new(Weight::from_json(weight)?))
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        Ok(Self::new(nodes))
    }
}
