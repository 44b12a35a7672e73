//! Validation error kinds and the per-field error accumulator.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::messages::{Translator, BLANK_KEY, INVALID_KEY};
use crate::validation::phone::PhoneValidator;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// A required field is absent or empty.
    Blank,
    /// The value fails its type rule (email, phone, date, integer).
    Invalid,
}

impl ErrorKind {
    /// Message key looked up through the [`Translator`].
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Blank => BLANK_KEY,
            Self::Invalid => INVALID_KEY,
        }
    }
}

/// Errors collected for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub kinds: Vec<ErrorKind>,
    pub messages: Vec<String>,
}

/// Field-scoped error accumulator.
///
/// Messages per field form an ordered set: adding the same message twice
/// keeps one copy. Fields keep the order in which they first failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: IndexMap<String, FieldEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FieldEntry {
    kinds: IndexSet<ErrorKind>,
    messages: IndexSet<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, kind: ErrorKind, message: String) {
        let entry = self.entries.entry(field.to_string()).or_default();
        entry.kinds.insert(kind);
        entry.messages.insert(message);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Distinct messages for a field, in insertion order.
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.entries
            .get(field)
            .map(|e| e.messages.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Error kinds recorded for a field.
    pub fn kinds(&self, field: &str) -> Vec<ErrorKind> {
        self.entries
            .get(field)
            .map(|e| e.kinds.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_kind(&self, field: &str, kind: ErrorKind) -> bool {
        self.entries
            .get(field)
            .is_some_and(|e| e.kinds.contains(&kind))
    }

    /// Messages for a field joined by `", "`, or `None` when it has none.
    pub fn joined(&self, field: &str) -> Option<String> {
        let messages = self.messages(field);
        if messages.is_empty() {
            None
        } else {
            Some(messages.join(", "))
        }
    }

    /// Snapshot of all field errors.
    pub fn to_vec(&self) -> Vec<ValidationError> {
        self.entries
            .iter()
            .map(|(field, e)| ValidationError {
                field: field.clone(),
                kinds: e.kinds.iter().copied().collect(),
                messages: e.messages.iter().cloned().collect(),
            })
            .collect()
    }
}

/// Collaborators a validation pass needs.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub phone: &'a dyn PhoneValidator,
    pub translator: &'a dyn Translator,
}

impl<'a> ValidationContext<'a> {
    pub fn new(phone: &'a dyn PhoneValidator, translator: &'a dyn Translator) -> Self {
        Self { phone, translator }
    }

    /// Record an error of `kind` on `field` with its translated message.
    pub fn reject(&self, errors: &mut FieldErrors, field: &str, kind: ErrorKind) {
        errors.add(field, kind, self.translator.translate(kind.message_key()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_collapse() {
        let mut errors = FieldErrors::new();
        errors.add("age", ErrorKind::Invalid, "is invalid".into());
        errors.add("age", ErrorKind::Invalid, "is invalid".into());
        assert_eq!(errors.messages("age"), vec!["is invalid"]);
        assert_eq!(errors.joined("age").as_deref(), Some("is invalid"));
    }

    #[test]
    fn distinct_messages_join_with_comma() {
        let mut errors = FieldErrors::new();
        errors.add("age", ErrorKind::Blank, "can't be blank".into());
        errors.add("age", ErrorKind::Invalid, "is invalid".into());
        assert_eq!(errors.joined("age").as_deref(), Some("can't be blank, is invalid"));
        assert_eq!(errors.kinds("age"), vec![ErrorKind::Blank, ErrorKind::Invalid]);
    }

    #[test]
    fn field_without_errors_has_no_joined_text() {
        let errors = FieldErrors::new();
        assert_eq!(errors.joined("email"), None);
        assert!(!errors.has_kind("email", ErrorKind::Blank));
    }

    #[test]
    fn snapshot_keeps_field_order() {
        let mut errors = FieldErrors::new();
        errors.add("phone", ErrorKind::Invalid, "is invalid".into());
        errors.add("name", ErrorKind::Blank, "can't be blank".into());
        let fields: Vec<_> = errors.to_vec().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["phone", "name"]);
        assert_eq!(errors.len(), 2);
        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ErrorKind::Blank).unwrap(), "blank");
    }
}
