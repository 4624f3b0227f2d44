//! Vendor (CRM) record shapes
//!
//! These are wire types owned by the external CRM. Only the fields the
//! dashboard exposes are modelled; everything else is carried in the
//! flattened `extra` maps so records can be passed through unchanged.
//!
//! `emails` and `phones` are optional blocks: an absent block means
//! "leave the stored value alone" on update, which is different from an
//! empty item list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Optimistic-concurrency token owned by the CRM
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Revision(pub u64);

impl Revision {
    /// Revision the CRM assigns after a successful mutation
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Some CRM APIs encode int64 revisions as JSON strings.
impl<'de> Deserialize<'de> for Revision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Contact record as stored by the CRM
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VendorRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<Revision>,

    #[serde(default)]
    pub info: VendorInfo,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VendorRecord {
    /// Decode a CRM response that is either `{"contact": {...}}` or the bare record
    pub fn from_response(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut obj) if obj.get("contact").is_some_and(Value::is_object) => {
                let inner = obj.remove("contact").unwrap_or(Value::Null);
                serde_json::from_value(inner)
            }
            other => serde_json::from_value(other),
        }
    }

    /// Decode a list response carrying records under `items` or `contacts`
    pub fn list_from_response(value: Value) -> Result<Vec<Self>, serde_json::Error> {
        let items = match value {
            Value::Object(mut obj) => obj
                .remove("items")
                .or_else(|| obj.remove("contacts"))
                .unwrap_or(Value::Array(Vec::new())),
            Value::Array(items) => Value::Array(items),
            _ => Value::Array(Vec::new()),
        };
        match items {
            Value::Array(items) => items.into_iter().map(Self::from_response).collect(),
            _ => Ok(Vec::new()),
        }
    }
}

/// Contact info block (`record.info`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VendorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NameBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<EmailsBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<PhonesBlock>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmailsBlock {
    #[serde(default)]
    pub items: Vec<EmailItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmailItem {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmailItem {
    /// Single primary email item
    pub fn primary(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            primary: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhonesBlock {
    #[serde(default)]
    pub items: Vec<PhoneItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhoneItem {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PhoneItem {
    /// Single primary phone item
    pub fn primary(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            primary: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_revision_accepts_number_and_string() {
        let a: Revision = serde_json::from_value(json!(5)).unwrap();
        let b: Revision = serde_json::from_value(json!("5")).unwrap();
        assert_eq!(a, Revision(5));
        assert_eq!(a, b);
        assert!(serde_json::from_value::<Revision>(json!("five")).is_err());
    }

    #[test]
    fn test_from_response_unwraps_contact_envelope() {
        let wrapped = json!({"contact": {"_id": "c1", "revision": 3, "info": {}}});
        let bare = json!({"_id": "c1", "revision": 3, "info": {}});

        let a = VendorRecord::from_response(wrapped).unwrap();
        let b = VendorRecord::from_response(bare).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, "c1");
        assert_eq!(a.revision, Some(Revision(3)));
    }

    #[test]
    fn test_opaque_fields_survive_passthrough() {
        let raw = json!({
            "_id": "c1",
            "revision": 2,
            "createdDate": "2024-01-01T00:00:00Z",
            "info": {
                "name": {"first": "Jane", "last": "Doe"},
                "company": "Acme",
                "emails": {"items": [{"email": "j@x.io", "primary": true, "_id": "e1"}]}
            }
        });

        let record = VendorRecord::from_response(raw.clone()).unwrap();
        assert_eq!(record.extra.get("createdDate"), Some(&json!("2024-01-01T00:00:00Z")));
        assert_eq!(record.info.extra.get("company"), Some(&json!("Acme")));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_absent_blocks_are_not_serialized() {
        let info = VendorInfo {
            name: Some(NameBlock {
                first: Some("Jane".into()),
                last: Some(String::new()),
            }),
            ..VendorInfo::default()
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value, json!({"name": {"first": "Jane", "last": ""}}));
    }

    #[test]
    fn test_list_from_response_accepts_items_or_contacts() {
        let a = VendorRecord::list_from_response(json!({"items": [{"_id": "a"}, {"_id": "b"}]})).unwrap();
        let b = VendorRecord::list_from_response(json!({"contacts": [{"_id": "a"}, {"_id": "b"}]})).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert!(VendorRecord::list_from_response(json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_plain_id_is_reencoded_as_underscore_id() {
        let record = VendorRecord::from_response(json!({"id": "c1", "revision": 2, "info": {}})).unwrap();
        assert_eq!(record.id, "c1");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"_id": "c1", "revision": 2, "info": {}})
        );
    }
}
