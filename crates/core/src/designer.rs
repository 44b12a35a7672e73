//! Configure-phase template designer.
//!
//! While an app owner composes a qualifier, each candidate field is an
//! editable row: a label input, an "optional" checkbox and a dropdown over the
//! catalogue. Nothing is validated here.
//!
//! Rows are identified only by their position (`item[<index>][...]`). The
//! client posts rows back in the order they were rendered; reordering rows
//! between requests is not supported and will mix up labels and names.

use crate::catalogue::FieldCatalogue;
use crate::schema::{
    Action, Align, ButtonNode, ButtonVariant, CheckboxNode, CheckboxOption, DropdownNode,
    DropdownOption, InputNode, ListEntry, ListNode, SchemaItem,
};

pub const TITLE: &str = "qualify users";
pub const SUBTITLE: &str = "Compose forms for qualificators";

/// Template chooser entry ids, also the configure `field.id` values.
pub const CONTACT_FIELDS_ID: &str = "contact-fields";
pub const ANY_FIELD_ID: &str = "any-field";
pub const ADD_FIELD_ID: &str = "add-field";
pub const CONFIRM_ID: &str = "confirm";

/// Fields pre-filled by the contact template.
pub const CONTACT_FIELDS: [&str; 3] = ["name", "email", "company_name"];

/// One candidate field row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRow {
    pub name: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct TemplateDesigner<'a> {
    options: &'a FieldCatalogue,
    items: Vec<TemplateRow>,
}

impl<'a> TemplateDesigner<'a> {
    pub fn new(options: &'a FieldCatalogue) -> Self {
        Self {
            options,
            items: Vec::new(),
        }
    }

    /// Append a row with an empty label. `None` renders a blank row.
    pub fn add_item(&mut self, name: Option<&str>) {
        self.add_row(name, "");
    }

    pub fn add_row(&mut self, name: Option<&str>, label: &str) {
        self.items.push(TemplateRow {
            name: name.map(str::to_string),
            label: label.to_string(),
        });
    }

    pub fn items(&self) -> &[TemplateRow] {
        &self.items
    }

    /// Header, every row, then the add/confirm buttons.
    pub fn schema(&self) -> Vec<SchemaItem> {
        let mut nodes = header_fields();
        for (index, row) in self.items.iter().enumerate() {
            nodes.extend(build_template_row(
                row.name.as_deref(),
                &row.label,
                index,
                self.options,
            ));
        }
        nodes.extend(confirm_buttons());
        nodes
    }
}

/// The three nodes of one editable row, in order: label input, optional
/// checkbox, field dropdown.
pub fn build_template_row(
    name: Option<&str>,
    label: &str,
    index: usize,
    catalogue: &FieldCatalogue,
) -> [SchemaItem; 3] {
    let label_input = SchemaItem::Input(InputNode {
        id: format!("item[{index}][label]"),
        placeholder: "enter your data".to_string(),
        label: Some("Label".to_string()),
        hint: None,
        value: Some(label.to_string()),
        errors: None,
        action: Action::submit(),
        disabled: false,
    });

    let optional_checkbox = SchemaItem::Checkbox(CheckboxNode {
        id: format!("input-optional-{index}"),
        text: "optional field".to_string(),
        options: vec![CheckboxOption {
            id: format!("{index}-optional"),
            name: format!("item[{index}][optional]"),
            text: "mark as optional".to_string(),
        }],
    });

    let field_dropdown = SchemaItem::Dropdown(DropdownNode {
        id: format!("item[{index}][name]"),
        label: "Value".to_string(),
        value: name.map(str::to_string),
        options: catalogue
            .specs()
            .iter()
            .map(|f| DropdownOption {
                text: f.name.clone(),
                name: f.name.clone(),
                id: f.name.clone(),
            })
            .collect(),
    });

    [label_input, optional_checkbox, field_dropdown]
}

pub fn header_fields() -> Vec<SchemaItem> {
    vec![
        SchemaItem::header(TITLE),
        SchemaItem::muted(SUBTITLE),
        SchemaItem::Separator,
    ]
}

pub fn confirm_buttons() -> Vec<SchemaItem> {
    vec![
        SchemaItem::Button(ButtonNode {
            id: ADD_FIELD_ID.to_string(),
            label: "Add new field".to_string(),
            align: Align::Left,
            variant: Some(ButtonVariant::Outlined),
            action: Action::submit(),
        }),
        SchemaItem::Button(ButtonNode {
            id: CONFIRM_ID.to_string(),
            label: "Confirm Fields".to_string(),
            align: Align::Center,
            variant: None,
            action: Action::submit(),
        }),
    ]
}

/// Static "pick a template" screen.
pub fn template_chooser() -> Vec<SchemaItem> {
    let mut nodes = header_fields();
    nodes.push(SchemaItem::section_title("Pick a template"));
    nodes.push(SchemaItem::List(ListNode {
        disabled: false,
        items: vec![
            ListEntry {
                id: CONTACT_FIELDS_ID.to_string(),
                title: "Contact fields".to_string(),
                subtitle: "Ask for name , email & company".to_string(),
                action: Action::submit(),
            },
            ListEntry {
                id: ANY_FIELD_ID.to_string(),
                title: "Custom Fields".to_string(),
                subtitle: "Ask for custom field data".to_string(),
                action: Action::submit(),
            },
        ],
    }));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{FieldSpec, FieldType};
    use serde_json::{json, Value};

    fn catalogue() -> FieldCatalogue {
        FieldCatalogue::new(vec![
            FieldSpec::new("name", FieldType::String, false),
            FieldSpec::new("email", FieldType::Email, false),
        ])
    }

    fn to_json(items: &[SchemaItem]) -> Vec<Value> {
        items
            .iter()
            .map(|i| serde_json::to_value(i).unwrap())
            .collect()
    }

    #[test]
    fn row_nodes_are_index_scoped_and_ordered() {
        let c = catalogue();
        let row = to_json(&build_template_row(Some("email"), "Your email", 2, &c));

        assert_eq!(row[0]["type"], "input");
        assert_eq!(row[0]["id"], "item[2][label]");
        assert_eq!(row[0]["value"], "Your email");

        assert_eq!(row[1]["type"], "checkbox");
        assert_eq!(row[1]["id"], "input-optional-2");
        assert_eq!(
            row[1]["options"][0],
            json!({
                "type": "option",
                "id": "2-optional",
                "name": "item[2][optional]",
                "text": "mark as optional"
            })
        );

        assert_eq!(row[2]["type"], "dropdown");
        assert_eq!(row[2]["id"], "item[2][name]");
        assert_eq!(row[2]["value"], "email");
        let options: Vec<_> = row[2]["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(options, vec!["name", "email"]);
    }

    #[test]
    fn blank_row_has_null_selection() {
        let c = catalogue();
        let row = to_json(&build_template_row(None, "", 0, &c));
        assert_eq!(row[2]["value"], Value::Null);
        assert_eq!(row[0]["value"], "");
    }

    #[test]
    fn schema_wraps_rows_in_header_and_buttons() {
        let c = catalogue();
        let mut designer = TemplateDesigner::new(&c);
        for name in CONTACT_FIELDS {
            designer.add_item(Some(name));
        }
        let schema = designer.schema();

        // 3 header nodes + 3 rows * 3 nodes + 2 buttons.
        assert_eq!(schema.len(), 3 + 9 + 2);
        assert_eq!(schema[2], SchemaItem::Separator);
        assert_eq!(schema[schema.len() - 2].id(), Some(ADD_FIELD_ID));
        assert_eq!(schema[schema.len() - 1].id(), Some(CONFIRM_ID));

        let json = to_json(&schema);
        assert_eq!(json[12]["variant"], "outlined");
        assert!(json[13].get("variant").is_none());
    }

    #[test]
    fn empty_catalogue_renders_empty_dropdown() {
        let c = FieldCatalogue::default();
        let mut designer = TemplateDesigner::new(&c);
        designer.add_item(None);
        let json = to_json(&designer.schema());
        assert_eq!(json[5]["options"], json!([]));
    }

    #[test]
    fn chooser_lists_both_templates() {
        let json = to_json(&template_chooser());
        assert_eq!(json.len(), 5);
        assert_eq!(json[3]["text"], "Pick a template");
        assert_eq!(json[4]["type"], "list");
        assert_eq!(json[4]["disabled"], false);
        assert_eq!(json[4]["items"][0]["id"], CONTACT_FIELDS_ID);
        assert_eq!(json[4]["items"][0]["type"], "item");
        assert_eq!(json[4]["items"][1]["id"], ANY_FIELD_ID);
    }
}
