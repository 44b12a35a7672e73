//! Webhook protocol dispatcher: initialize, configure, submit and sheet.
//!
//! Each hook takes the request context the messenger sends and returns the
//! `{ kind, definitions, results }` response. Hooks are synchronous and keep
//! no state between calls; the caller echoes prior values and definitions
//! back on the next request.
//!
//! The submit hook never performs the profile write itself. When a submission
//! from an end user validates, it hands back a [`ProfileUpdate`] for the
//! caller to apply.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::catalogue::FieldCatalogue;
use crate::designer::{
    template_chooser, TemplateDesigner, ADD_FIELD_ID, ANY_FIELD_ID, CONFIRM_ID,
    CONTACT_FIELDS, CONTACT_FIELDS_ID,
};
use crate::error::CoreError;
use crate::record::QualifierRecord;
use crate::schema::SchemaItem;
use crate::types::{
    is_blank, is_present, scalar_to_string, strip_optional_suffix, with_optional_suffix,
    FieldValues, OPTIONAL_SUFFIX,
};
use crate::validation::rules::{ValidationContext, ValidationError};

/// `kind` returned by the configure hook once the owner confirms.
pub const INITIALIZE_KIND: &str = "initialize";

// ---------------------------------------------------------------------------
// Request context
// ---------------------------------------------------------------------------

/// Body of a hook request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookRequest {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub ctx: HookContext,
}

/// Phase-scoped request context.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookContext {
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(default)]
    pub package: Package,
    #[serde(default, deserialize_with = "lenient_user")]
    pub current_user: Option<CurrentUser>,
    #[serde(default)]
    pub field: Option<FieldTrigger>,
    #[serde(default)]
    pub definitions: Option<Vec<PriorDefinition>>,
}

impl HookContext {
    pub fn catalogue(&self) -> &FieldCatalogue {
        &self.package.app.searcheable_fields
    }

    fn field_id(&self) -> Option<&str> {
        self.field.as_ref().and_then(|f| f.id.as_deref())
    }

    fn field_action(&self) -> Option<&str> {
        self.field
            .as_ref()
            .and_then(|f| f.action.as_ref())
            .and_then(|a| a.kind.as_deref())
    }

    /// Label of the prior-phase definition whose id is `key`, falling back
    /// to its optional-marked id.
    fn prior_label(&self, key: &str) -> Option<String> {
        let definitions = self.definitions.as_deref()?;
        let optional_key = with_optional_suffix(key);
        [key, optional_key.as_str()].iter().find_map(|id| {
            definitions
                .iter()
                .find(|d| d.id.as_deref() == Some(*id))
                .and_then(|d| d.label.clone())
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub app: AppPackage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppPackage {
    #[serde(default)]
    pub searcheable_fields: FieldCatalogue,
}

/// The caller as resolved by the messenger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurrentUser {
    /// End user (contact or lead) filling in the qualifier.
    AppUser(UserRef),
    /// Team member of the app, designing or previewing the qualifier.
    Agent(UserRef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Value,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// Unrecognized user shapes are treated as an anonymous caller.
fn lenient_user<'de, D>(deserializer: D) -> Result<Option<CurrentUser>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// The UI element that triggered a configure request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldTrigger {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub action: Option<TriggerAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerAction {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// The parts of an echoed definition the submit hook reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorDefinition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub definitions: Vec<SchemaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
}

impl HookResponse {
    fn new(kind: Option<String>, definitions: Vec<SchemaItem>) -> Self {
        Self {
            kind,
            definitions,
            results: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.results.is_some()
    }
}

/// Validated values to write to an end user's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub user: UserRef,
    pub properties: FieldValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub response: HookResponse,
    pub errors: Vec<ValidationError>,
    pub profile_update: Option<ProfileUpdate>,
}

// ---------------------------------------------------------------------------
// Submitted template rows (`values.item`)
// ---------------------------------------------------------------------------

/// One row posted back from the template designer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedRow {
    pub name: Option<String>,
    pub label: Option<String>,
    pub optional: bool,
}

/// Read `values.item`, which arrives either as an array of rows or as an
/// object keyed by row index (`item[0][label]` form encoding). Returns `None`
/// when the key is missing or not row-shaped.
pub fn submitted_rows(values: &Map<String, Value>) -> Option<Vec<SubmittedRow>> {
    let rows: Vec<&Value> = match values.get("item")? {
        Value::Array(rows) => rows.iter().collect(),
        Value::Object(rows) => {
            let mut indexed: Vec<(&String, &Value)> = rows.iter().collect();
            indexed.sort_by_key(|(k, _)| k.parse::<usize>().unwrap_or(usize::MAX));
            indexed.into_iter().map(|(_, v)| v).collect()
        }
        _ => return None,
    };

    Some(
        rows.into_iter()
            .filter_map(Value::as_object)
            .map(|row| SubmittedRow {
                name: row
                    .get("name")
                    .and_then(scalar_to_string)
                    .filter(|n| !is_blank(n)),
                label: row
                    .get("label")
                    .and_then(scalar_to_string)
                    .filter(|l| !l.is_empty()),
                optional: row.get("optional").is_some_and(is_present),
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// Initialize: render the configured fields for display, no validation.
///
/// Fields come from the confirmed template rows in `values.item`; without
/// them the catalogue itself is rendered. Optional fields get a
/// `--optional` id.
pub fn initialize_hook(kind: Option<String>, ctx: &HookContext) -> HookResponse {
    let catalogue = ctx.catalogue();
    let rows = submitted_rows(&ctx.values).unwrap_or_else(|| {
        catalogue
            .specs()
            .iter()
            .map(|f| SubmittedRow {
                name: Some(f.name.clone()),
                label: None,
                optional: f.optional,
            })
            .collect()
    });

    let mut record = QualifierRecord::empty(catalogue);
    for row in rows {
        let Some(name) = row.name else { continue };
        let key = if row.optional {
            with_optional_suffix(&name)
        } else {
            name
        };
        record.add_item(&key, row.label);
    }

    HookResponse::new(kind, record.schema())
}

/// Configure: template design for the app owner.
///
/// `confirm` echoes the submitted rows back as results without validating
/// them.
pub fn configure_hook(kind: Option<String>, ctx: &HookContext) -> Result<HookResponse, CoreError> {
    let catalogue = ctx.catalogue();

    match ctx.field_id() {
        Some(CONTACT_FIELDS_ID) => {
            let mut designer = TemplateDesigner::new(catalogue);
            for name in CONTACT_FIELDS {
                designer.add_item(Some(name));
            }
            Ok(HookResponse::new(kind, designer.schema()))
        }
        Some(ANY_FIELD_ID) => {
            let mut designer = TemplateDesigner::new(catalogue);
            designer.add_item(None);
            Ok(HookResponse::new(kind, designer.schema()))
        }
        Some(ADD_FIELD_ID) => {
            let rows = submitted_rows(&ctx.values).ok_or_else(|| {
                CoreError::Validation("values.item is required to add a field".to_string())
            })?;
            let mut designer = TemplateDesigner::new(catalogue);
            for row in &rows {
                designer.add_row(row.name.as_deref(), row.label.as_deref().unwrap_or_default());
            }
            designer.add_item(None);
            Ok(HookResponse::new(kind, designer.schema()))
        }
        Some(CONFIRM_ID) if ctx.field_action() == Some("submit") => Ok(HookResponse {
            kind: Some(INITIALIZE_KIND.to_string()),
            definitions: template_chooser(),
            results: Some(Value::Object(ctx.values.clone())),
        }),
        _ => Ok(HookResponse::new(None, template_chooser())),
    }
}

/// Submit: validate an end user's entries and confirm them when valid.
pub fn submit_hook(
    kind: Option<String>,
    ctx: &HookContext,
    validation: &ValidationContext<'_>,
) -> SubmitOutcome {
    let catalogue = ctx.catalogue();

    // Keys outside the catalogue (plain or optional-marked) are dropped.
    let permitted_keys = catalogue.permitted_keys();
    let permitted: Vec<(&String, String)> = ctx
        .values
        .iter()
        .filter(|(key, _)| permitted_keys.contains(key))
        .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key, v)))
        .collect();

    let mut values = FieldValues::new();
    let mut bypass: Vec<&str> = Vec::new();
    for (key, value) in &permitted {
        let name = strip_optional_suffix(key);
        if key.ends_with(OPTIONAL_SUFFIX) {
            bypass.push(name);
        }
        values.insert(name.to_string(), value.clone());
    }

    let validatable: Vec<String> = values
        .keys()
        .filter(|k| !bypass.contains(&k.as_str()))
        .cloned()
        .collect();

    let mut record = QualifierRecord::new(catalogue, values);
    record.set_validatable_fields(validatable);
    let valid = record.validate(validation);

    let keys: Vec<String> = record.values().keys().cloned().collect();
    for key in &keys {
        let label = ctx.prior_label(key);
        let item = record.add_item(key, label);
        if let Some(label) = item.label.as_ref().filter(|l| !l.is_empty()) {
            item.placeholder = label.clone();
        }
    }

    let profile_update = match (&ctx.current_user, valid) {
        (Some(CurrentUser::AppUser(user)), true) => Some(ProfileUpdate {
            user: user.clone(),
            properties: record.values().clone(),
        }),
        _ => None,
    };

    let errors = record.errors().to_vec();
    let response = if valid {
        let raw: Map<String, Value> = permitted
            .iter()
            .filter_map(|(key, _)| ctx.values.get(*key).map(|v| ((*key).clone(), v.clone())))
            .collect();
        HookResponse {
            kind,
            definitions: record.confirmed_definitions(),
            results: Some(Value::Object(raw)),
        }
    } else {
        HookResponse::new(kind, record.schema())
    };

    SubmitOutcome {
        response,
        errors,
        profile_update,
    }
}

/// Sheet submissions carry nothing this app acts on.
pub fn sheet_hook(_params: &Value) -> Vec<Value> {
    Vec::new()
}
