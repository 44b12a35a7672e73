//! Qualifier session record: the in-flight submission for one request.
//!
//! Holds the submitted values, borrows the app catalogue, knows which fields
//! must pass the required check, and renders the input items for the
//! response. Nothing here outlives the request.

use crate::catalogue::{FieldCatalogue, FieldType};
use crate::schema::{Action, InputNode, SchemaItem};
use crate::types::{base_name, FieldValues};
use crate::validation::evaluator::{required_rule, validate_catalogue, validate_required};
use crate::validation::rules::{FieldErrors, ValidationContext};

/// Hint shown under phone inputs.
pub const PHONE_HINT: &str = "Example: +5699303030";
/// Hint shown under inputs bound to a `date` catalogue field.
pub const DATE_HINT: &str = "Needs a valid date, Example: 2012-12-20";

#[derive(Debug, Clone)]
pub struct QualifierRecord<'a> {
    values: FieldValues,
    catalogue: &'a FieldCatalogue,
    validatable_fields: Vec<String>,
    items: Vec<InputNode>,
    errors: FieldErrors,
}

impl<'a> QualifierRecord<'a> {
    pub fn new(catalogue: &'a FieldCatalogue, values: FieldValues) -> Self {
        Self {
            values,
            catalogue,
            validatable_fields: Vec::new(),
            items: Vec::new(),
            errors: FieldErrors::new(),
        }
    }

    /// Record with no submitted values (display-only rendering).
    pub fn empty(catalogue: &'a FieldCatalogue) -> Self {
        Self::new(catalogue, FieldValues::new())
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Fields that must pass the required check. A listed field with no
    /// submitted value is validated as blank.
    pub fn set_validatable_fields(&mut self, fields: Vec<String>) {
        self.validatable_fields = fields;
    }

    /// Run both validation passes from scratch and report whether the record
    /// is valid. Date values are normalized as a side effect; running again
    /// over normalized values changes nothing.
    pub fn validate(&mut self, ctx: &ValidationContext<'_>) -> bool {
        self.errors.clear();
        validate_required(
            &self.validatable_fields,
            &self.values,
            self.catalogue,
            ctx,
            &mut self.errors,
        );
        validate_catalogue(&mut self.values, self.catalogue, ctx, &mut self.errors);
        self.errors.is_empty()
    }

    /// Errors from the most recent [`validate`](Self::validate) call.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Append an input item for the field key `key`.
    ///
    /// `key` may carry a `--optional` marker; value, hint and errors are
    /// looked up by the base name.
    pub fn add_item(&mut self, key: &str, label: Option<String>) -> &mut InputNode {
        let item = self.build_input(key, label);
        self.items.push(item);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Render one submit-phase input node without storing it.
    pub fn build_input(&self, key: &str, label: Option<String>) -> InputNode {
        let base = base_name(key);
        InputNode {
            id: key.to_string(),
            placeholder: format!("type your {base}"),
            label,
            hint: self.hint_for(base).map(str::to_string),
            value: self.value(base).map(str::to_string),
            errors: self.errors.joined(base),
            action: Action::submit(),
            disabled: false,
        }
    }

    /// Hint for an input, chosen with the same rule the required pass
    /// validates the field with.
    pub fn hint_for(&self, name: &str) -> Option<&'static str> {
        match required_rule(name, self.catalogue) {
            FieldType::Phone => Some(PHONE_HINT),
            FieldType::Date => Some(DATE_HINT),
            _ => None,
        }
    }

    pub fn items(&self) -> &[InputNode] {
        &self.items
    }

    /// Live (editable) schema.
    pub fn schema(&self) -> Vec<SchemaItem> {
        self.items.iter().cloned().map(SchemaItem::Input).collect()
    }

    /// Locked schema: every item marked `disabled`.
    pub fn confirmed_definitions(&mut self) -> Vec<SchemaItem> {
        for item in &mut self.items {
            item.disabled = true;
        }
        self.schema()
    }
}
