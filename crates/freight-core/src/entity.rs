//! Primary-key metadata for stored records

use freight_types::{Organization, Shipment};
use serde::Serialize;
use serde_json::Value;

/// A record that can live in a [`Store`](crate::ports::Store).
///
/// Each entity type declares which of its wire fields is the primary key and
/// how to read it. Field names are the serialized (camelCase) names.
pub trait Entity: Serialize + Clone + Send + Sync + 'static {
    /// Name of the primary-key field.
    const PRIMARY: &'static str;

    /// Current primary-key value. `None` never matches any key.
    fn primary_key(&self) -> Option<&str>;

    /// Value of an arbitrary top-level field, compared as text.
    ///
    /// Strings compare as-is, numbers and booleans by their JSON text. Nested
    /// values and nulls are not addressable.
    fn field(&self, name: &str) -> Option<String> {
        if name == Self::PRIMARY {
            return self.primary_key().map(str::to_string);
        }

        match serde_json::to_value(self).ok()?.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn has_key(&self, key: &str) -> bool {
        self.primary_key() == Some(key)
    }
}

impl Entity for Organization {
    const PRIMARY: &'static str = "id";

    fn primary_key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "code" => Some(self.code.clone()),
            "type" => Some("ORGANIZATION".to_string()),
            _ => None,
        }
    }
}

impl Entity for Shipment {
    const PRIMARY: &'static str = "referenceId";

    fn primary_key(&self) -> Option<&str> {
        Some(&self.reference_id)
    }
}
