//! Organization records

use crate::error::{ValidationError, ValidationResult};
use crate::optional_str;
use serde::Serialize;
use serde_json::Value;

/// A registered organization.
///
/// `id` is the primary key. Organizations referenced from a shipment by bare
/// code are stubs and carry no `id` until they are reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "ORGANIZATION")]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
}

impl Organization {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            code: code.into(),
        }
    }

    pub fn stub(code: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
        }
    }

    pub fn is_stub(&self) -> bool {
        self.id.is_none()
    }

    /// Build an organization from an untyped payload.
    ///
    /// A bare string is taken as the code of a stub organization. An object
    /// must carry a non-empty string `code`; `id` is optional and an empty
    /// `id` counts as absent.
    pub fn from_json(json: &Value) -> ValidationResult<Self> {
        match json {
            Value::String(code) if !code.is_empty() => Ok(Self::stub(code.clone())),
            Value::Object(_) => {
                let code = optional_str(json, "code")?
                    .filter(|code| !code.is_empty())
                    .ok_or_else(ValidationError::invalid_json)?;
                let id = optional_str(json, "id")?.filter(|id| !id.is_empty());
                Ok(Self { id, code })
            }
            _ => Err(ValidationError::invalid_json()),
        }
    }

    pub fn from_json_array(json: &Value) -> ValidationResult<Vec<Self>> {
        json.as_array()
            .ok_or_else(ValidationError::invalid_json)?
            .iter()
            .map(Self::from_json)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_organization() {
        let org = Organization::from_json(&json!({
            "id": "381f5cc5-dfe4-4f58-98ad-116666855ca3",
            "code": "SEA",
            "type": "ORGANIZATION"
        }))
        .unwrap();
        assert_eq!(org, Organization::new("381f5cc5-dfe4-4f58-98ad-116666855ca3", "SEA"));
        assert!(!org.is_stub());
    }

    #[test]
    fn test_bare_string_is_stub() {
        let org = Organization::from_json(&json!("ORGANIZATION_1")).unwrap();
        assert_eq!(org, Organization::stub("ORGANIZATION_1"));
        assert!(org.is_stub());
    }

    #[test]
    fn test_empty_object_rejected() {
        let err = Organization::from_json(&json!({})).unwrap_err();
        assert_eq!(err.message(), "Invalid JSON");
    }

    #[test]
    fn test_missing_code_rejected() {
        assert!(Organization::from_json(&json!({ "id": "A" })).is_err());
        assert!(Organization::from_json(&json!({ "id": "A", "code": "" })).is_err());
        assert!(Organization::from_json(&json!("")).is_err());
        assert!(Organization::from_json(&json!(42)).is_err());
        assert!(Organization::from_json(&Value::Null).is_err());
    }

    #[test]
    fn test_code_only_object_has_no_id() {
        let org = Organization::from_json(&json!({ "code": "FMT", "id": "" })).unwrap();
        assert!(org.is_stub());
        assert_eq!(org.code, "FMT");
    }

    #[test]
    fn test_array_mixes_stubs_and_objects() {
        let orgs =
            Organization::from_json_array(&json!(["BOG", { "id": "1", "code": "SEA" }])).unwrap();
        assert_eq!(orgs, vec![Organization::stub("BOG"), Organization::new("1", "SEA")]);
        assert!(Organization::from_json_array(&json!({ "code": "SEA" })).is_err());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_value(Organization::new("1", "SEA")).unwrap(),
            json!({ "type": "ORGANIZATION", "id": "1", "code": "SEA" })
        );
        assert_eq!(
            serde_json::to_value(Organization::stub("SEA")).unwrap(),
            json!({ "type": "ORGANIZATION", "code": "SEA" })
        );
    }
}
