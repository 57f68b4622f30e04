//! Character Sheet Template Schema
//!
//! A template is a recursive tree of [`FieldDefinition`]s keyed by field
//! name. The tree is authored elsewhere and handed to this crate as JSON;
//! everything here is read-only traversal over it.
//!
//! # Shape
//!
//! - **Containers**: `object` nests another [`Schema`]; `list` and
//!   `objectlist` hold arrays whose record items have declared columns
//! - **Leaves**: `string`, `number`, `boolean`, `textarea`
//! - **Pseudo-leaves**: `status` (`{value, max}`), `attribute`
//!   (`{value, bonus}`), `dadovida` (`circle_{i}` flags) and `statuscusto`
//!   (a cost pointing at a status leaf) have a fixed set of sub-paths
//!
//! Unknown `type` tags deserialize to [`FieldKind::Unknown`] and are treated
//! as plain leaves.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::common::{title_case_key, PATH_SEPARATOR};
use crate::error::DomainError;

// =============================================================================
// Schema
// =============================================================================

/// A template: field definitions in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: IndexMap<String, FieldDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a template document.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, DomainError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_field(mut self, key: impl Into<String>, field: FieldDefinition) -> Self {
        self.fields.insert(key.into(), field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldDefinition)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find the field declared at a dot path, descending through `object`
    /// fields only.
    pub fn field_at(&self, path: &str) -> Option<&FieldDefinition> {
        let mut segments = path.split(PATH_SEPARATOR);
        let first = self.get(segments.next()?)?;
        segments.try_fold(first, |field, segment| match &field.kind {
            FieldKind::Object { fields } => fields.get(segment),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a FieldDefinition);
    type IntoIter = indexmap::map::Iter<'a, String, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldDefinition)> for Schema {
    fn from_iter<T: IntoIterator<Item = (String, FieldDefinition)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Field Definitions
// =============================================================================

/// Definition of a single field in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field kind and its kind-specific attributes
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Display key override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the field must be filled before submission
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Layout hints, carried through untouched
    #[serde(flatten)]
    pub layout: FieldLayout,
}

impl FieldDefinition {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            name: None,
            required: false,
            layout: FieldLayout::default(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label shown to the user: the explicit `name`, or the key title-cased.
    pub fn display_name(&self, key: &str) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => title_case_key(key),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, FieldKind::Object { .. })
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::List { .. } | FieldKind::ObjectList { .. }
        )
    }
}

/// Field data type and kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text, optionally restricted to `options`
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Vec<String>>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Textarea,
    /// Nested template
    Object {
        #[serde(default)]
        fields: Schema,
    },
    /// Array of scalars (constrained by `options`) or of records (`columns`)
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    /// Array of records whose keys are the sub-fields' names
    #[serde(rename = "objectlist")]
    ObjectList {
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
    /// Depletable resource: `{value, max}`
    Status,
    /// Score with bonus: `{value, bonus}`
    Attribute,
    /// Hit-dice tracker: `quantity` boolean circles
    #[serde(rename = "dadovida")]
    DadoVida {
        #[serde(default, deserialize_with = "lenient_count")]
        quantity: u32,
    },
    /// Cost deducted from the status leaf at `status_target`
    #[serde(rename = "statuscusto")]
    StatusCusto {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status_target: Option<String>,
    },
    /// Unknown for forward compatibility
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// The `type` tag as written in templates.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::String { .. } => "string",
            FieldKind::Number { .. } => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Textarea => "textarea",
            FieldKind::Object { .. } => "object",
            FieldKind::List { .. } => "list",
            FieldKind::ObjectList { .. } => "objectlist",
            FieldKind::Status => "status",
            FieldKind::Attribute => "attribute",
            FieldKind::DadoVida { .. } => "dadovida",
            FieldKind::StatusCusto { .. } => "statuscusto",
            FieldKind::Unknown => "unknown",
        }
    }
}

/// Counts written by hand in templates: numeric strings are accepted,
/// fractions are truncated, negative or non-numeric values read as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let count = match raw {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(count
        .filter(|count| count.is_finite() && *count > 0.0)
        .map_or(0, |count| count.min(f64::from(u32::MAX)) as u32))
}

// =============================================================================
// Layout
// =============================================================================

/// Layout hints for field rendering. Stored as raw JSON so templates keep
/// whatever the authoring editor wrote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldLayout {
    /// Grid columns the field spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<serde_json::Value>,
    /// Visible rows for text areas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<serde_json::Value>,
}

// =============================================================================
// Tests
// =============================================================================
