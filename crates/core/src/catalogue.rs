//! App-level field catalogue ("searcheable fields").
//!
//! The catalogue is owned by the app configuration and arrives with every
//! webhook request. It is read-only here: it decides which submitted keys are
//! permitted and which type rule each field is validated with.

use serde::{Deserialize, Serialize};

use crate::types::with_optional_suffix;

// ---------------------------------------------------------------------------
// Field type
// ---------------------------------------------------------------------------

/// Declared data type of a catalogue field.
///
/// Unknown or null type names deserialize to [`FieldType::String`], which
/// carries no format rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum FieldType {
    #[default]
    String,
    Email,
    Phone,
    Date,
    Integer,
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "phone" => Self::Phone,
            "date" => Self::Date,
            "integer" => Self::Integer,
            _ => Self::String,
        }
    }
}

impl From<Option<String>> for FieldType {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Field spec
// ---------------------------------------------------------------------------

/// One field definition chosen by the app owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub optional: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType, optional: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// Ordered, read-only list of field definitions.
///
/// Every derived list preserves catalogue order. An empty catalogue is valid
/// and simply permits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalogue {
    fields: Vec<FieldSpec>,
}

impl FieldCatalogue {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// All field definitions in catalogue order.
    pub fn specs(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by its exact name.
    pub fn find(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declared type of a field, if it is in the catalogue.
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.find(name).map(|f| f.field_type)
    }

    /// Plain field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Field names carrying the optional marker.
    pub fn optional_keys(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| with_optional_suffix(&f.name))
            .collect()
    }

    /// Every key a submission may carry: plain names first, then their
    /// optional-marked forms.
    pub fn permitted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .field_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        keys.extend(self.optional_keys());
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalogue() -> FieldCatalogue {
        FieldCatalogue::new(vec![
            FieldSpec::new("name", FieldType::String, false),
            FieldSpec::new("email", FieldType::Email, false),
            FieldSpec::new("birthday", FieldType::Date, true),
        ])
    }

    #[test]
    fn deserializes_from_app_payload() {
        let c: FieldCatalogue = serde_json::from_value(json!([
            {"name": "email", "type": "email", "optional": false},
            {"name": "age", "type": "integer"},
            {"name": "notes", "type": "text"},
            {"name": "nickname"},
            {"name": "title", "type": null}
        ]))
        .unwrap();

        assert_eq!(c.len(), 5);
        assert_eq!(c.field_type("email"), Some(FieldType::Email));
        assert_eq!(c.field_type("age"), Some(FieldType::Integer));
        assert!(!c.find("age").unwrap().optional);
        // Unknown, missing and null types fall back to plain strings.
        assert_eq!(c.field_type("notes"), Some(FieldType::String));
        assert_eq!(c.field_type("nickname"), Some(FieldType::String));
        assert_eq!(c.field_type("title"), Some(FieldType::String));
    }

    #[test]
    fn field_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(FieldType::Integer).unwrap(), json!("integer"));
    }

    #[test]
    fn permitted_keys_preserve_catalogue_order() {
        assert_eq!(
            catalogue().permitted_keys(),
            vec![
                "name",
                "email",
                "birthday",
                "name--optional",
                "email--optional",
                "birthday--optional",
            ]
        );
    }

    #[test]
    fn optional_keys_carry_the_marker() {
        let keys = catalogue().optional_keys();
        assert_eq!(keys, vec!["name--optional", "email--optional", "birthday--optional"]);
        assert!(!keys.contains(&"password--optional".to_string()));
    }

    #[test]
    fn empty_catalogue_permits_nothing() {
        let c = FieldCatalogue::default();
        assert!(c.is_empty());
        assert!(c.permitted_keys().is_empty());
        assert!(c.optional_keys().is_empty());
    }
}
