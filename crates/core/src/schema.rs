//! Declarative UI descriptor nodes sent back to the messenger client.
//!
//! Nodes serialize to the `{ "type": "...", ... }` shape the client renders.
//! Rendering itself is the client's job; these types only describe it.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Client action triggered by a node (always a form submit here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Action {
    pub fn submit() -> Self {
        Self {
            kind: "submit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Header,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Outlined,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// ---------------------------------------------------------------------------
// Node payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextNode {
    pub style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    pub text: String,
}

/// Selectable list of entries (the template chooser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListNode {
    pub disabled: bool,
    pub items: Vec<ListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "item")]
pub struct ListEntry {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub action: Action,
}

/// Text input bound to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputNode {
    pub id: String,
    pub placeholder: String,
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
    pub action: Action,
    #[serde(skip_serializing_if = "is_false")]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxNode {
    pub id: String,
    pub text: String,
    pub options: Vec<CheckboxOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "option")]
pub struct CheckboxOption {
    pub id: String,
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownNode {
    pub id: String,
    pub label: String,
    pub value: Option<String>,
    pub options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "option")]
pub struct DropdownOption {
    pub text: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonNode {
    pub id: String,
    pub label: String,
    pub align: Align,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ButtonVariant>,
    pub action: Action,
}

// ---------------------------------------------------------------------------
// SchemaItem
// ---------------------------------------------------------------------------

/// One node of the response `definitions` tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaItem {
    Text(TextNode),
    Separator,
    List(ListNode),
    Input(InputNode),
    Checkbox(CheckboxNode),
    Dropdown(DropdownNode),
    Button(ButtonNode),
}

impl SchemaItem {
    /// Centered header text.
    pub fn header(text: impl Into<String>) -> Self {
        Self::Text(TextNode {
            style: TextStyle::Header,
            align: Some(Align::Center),
            text: text.into(),
        })
    }

    /// Centered muted text.
    pub fn muted(text: impl Into<String>) -> Self {
        Self::Text(TextNode {
            style: TextStyle::Muted,
            align: Some(Align::Center),
            text: text.into(),
        })
    }

    /// Header text with the client's default alignment.
    pub fn section_title(text: impl Into<String>) -> Self {
        Self::Text(TextNode {
            style: TextStyle::Header,
            align: None,
            text: text.into(),
        })
    }

    /// Node id, for node types that carry one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Input(n) => Some(&n.id),
            Self::Checkbox(n) => Some(&n.id),
            Self::Dropdown(n) => Some(&n.id),
            Self::Button(n) => Some(&n.id),
            Self::Text(_) | Self::Separator | Self::List(_) => None,
        }
    }

    /// Lock the node against further edits. Nodes without a disabled state
    /// are left as they are.
    pub fn disable(&mut self) {
        match self {
            Self::Input(n) => n.disabled = true,
            Self::List(n) => n.disabled = true,
            Self::Text(_)
            | Self::Separator
            | Self::Checkbox(_)
            | Self::Dropdown(_)
            | Self::Button(_) => {}
        }
    }
}

/// Locked copy of a schema: every lockable node is marked `disabled`.
///
/// Applying this to an already confirmed schema yields the same schema.
pub fn confirmed(items: &[SchemaItem]) -> Vec<SchemaItem> {
    items
        .iter()
        .cloned()
        .map(|mut item| {
            item.disable();
            item
        })
        .collect()
}
