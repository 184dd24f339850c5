//! # Form Schema
//!
//! One form definition drives every editable screen. A `FormSchema` declares
//! fields (name, label, kind, required); a `Form` holds the raw text the user
//! typed and turns it into JSON on submit.
//!
//! Field names are dotted paths into the submitted object, so the tour price
//! table is just 24 `Number` fields:
//!
//! ```text
//! prices.privateTourWithLunch.single   = "120"
//! prices.privateTourWithLunch.twoPeople = "200"
//!            ↓ to_json()
//! { "prices": { "privateTourWithLunch": { "single": 120.0, "twoPeople": 200.0 } } }
//! ```
//!
//! Add and update share a schema; update differs only in being prefilled
//! from the fetched entity.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::types::{PriceCategory, PriceTier};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// Masked when rendered.
    Secret,
    Number,
    /// Comma-separated, trimmed into an array.
    List,
    /// Must be one of the listed values.
    Choice(&'static [&'static str]),
    /// Comma-separated local file paths. Sent as uploads, not JSON.
    Files,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(String),
    #[error("{0} must be a number")]
    NotNumber(String),
    #[error("{label} must be one of: {options}")]
    InvalidChoice { label: String, options: String },
    #[error("invalid form data: {0}")]
    Shape(String),
}

#[derive(Debug, Clone)]
pub struct Form {
    schema: FormSchema,
    values: Vec<String>,
}

impl Form {
    pub fn new(schema: FormSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|field| match &field.kind {
                FieldKind::Choice(options) => options.first().copied().unwrap_or("").to_string(),
                _ => String::new(),
            })
            .collect();
        Self { schema, values }
    }

    /// A form whose fields are prefilled from an existing JSON object.
    pub fn prefilled(schema: FormSchema, source: &Value) -> Self {
        let mut form = Self::new(schema);
        form.prefill(source);
        form
    }

    pub fn prefill(&mut self, source: &Value) {
        for (field, value) in self.schema.fields.iter().zip(self.values.iter_mut()) {
            if let Some(found) = lookup(source, &field.name) {
                *value = display_value(found);
            }
        }
    }

    pub fn title(&self) -> &'static str {
        self.schema.title
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &str)> {
        self.schema
            .fields
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&FieldSpec> {
        self.schema.fields.get(index)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.index_of(name).map(|i| self.values[i].as_str())
    }

    pub fn value_at_mut(&mut self, index: usize) -> Option<&mut String> {
        self.values.get_mut(index)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if let Some(i) = self.index_of(name) {
            self.values[i] = value.into();
        }
    }

    /// Advances a choice field to its next option, wrapping.
    pub fn cycle_choice(&mut self, index: usize) {
        let Some(FieldKind::Choice(options)) = self.schema.fields.get(index).map(|f| &f.kind)
        else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|o| *o == self.values[index])
            .map(|p| (p + 1) % options.len())
            .unwrap_or(0);
        self.values[index] = options[current].to_string();
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.schema.fields.iter().position(|f| f.name == name)
    }

    /// Validates every field and builds the nested JSON object.
    ///
    /// Empty optional fields are omitted; empty lists become `[]`.
    pub fn to_json(&self) -> Result<Value, FormError> {
        let mut root = Map::new();
        for (field, raw) in self.fields() {
            if field.kind == FieldKind::Files {
                continue;
            }
            let text = if field.kind == FieldKind::Secret {
                raw
            } else {
                raw.trim()
            };

            if text.is_empty() {
                if field.required {
                    return Err(FormError::Required(field.label.clone()));
                }
                if field.kind == FieldKind::List {
                    insert_path(&mut root, &field.name, Value::Array(Vec::new()));
                }
                continue;
            }

            let value = match &field.kind {
                FieldKind::Number => text
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| FormError::NotNumber(field.label.clone()))?,
                FieldKind::List => Value::Array(
                    text.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| Value::String(s.to_string()))
                        .collect(),
                ),
                FieldKind::Choice(options) => {
                    if !options.contains(&text) {
                        return Err(FormError::InvalidChoice {
                            label: field.label.clone(),
                            options: options.join(", "),
                        });
                    }
                    Value::String(text.to_string())
                }
                FieldKind::Text | FieldKind::TextArea | FieldKind::Secret | FieldKind::Files => {
                    Value::String(text.to_string())
                }
            };
            insert_path(&mut root, &field.name, value);
        }
        Ok(Value::Object(root))
    }

    /// Validates and decodes into a typed draft.
    pub fn submit<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        serde_json::from_value(self.to_json()?).map_err(|e| FormError::Shape(e.to_string()))
    }

    /// Local files listed in `Files` fields.
    pub fn uploads(&self) -> Vec<PathBuf> {
        self.fields()
            .filter(|(field, _)| field.kind == FieldKind::Files)
            .flat_map(|(_, raw)| raw.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(value, |node, key| node.get(key))
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut node = root;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            node.insert(part.to_string(), value);
            return;
        }
        let entry = node
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(child) = entry else {
            return;
        };
        node = child;
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

// ============================================================================
// Schemas
// ============================================================================

pub const ROLE_OPTIONS: &[&str] = &["user", "admin"];
pub const STATUS_OPTIONS: &[&str] = &["pending", "confirmed", "cancelled", "completed"];

pub fn login_schema() -> FormSchema {
    FormSchema {
        title: "Sign in",
        fields: vec![
            FieldSpec::new("email", "Email", FieldKind::Text).required(),
            FieldSpec::new("password", "Password", FieldKind::Secret).required(),
        ],
    }
}

/// Shared by add-tour and update-tour.
pub fn tour_schema() -> FormSchema {
    let mut fields = vec![
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::new("duration", "Duration", FieldKind::Text),
        FieldSpec::new("type", "Type", FieldKind::Text),
        FieldSpec::new("availability", "Availability", FieldKind::Text),
        FieldSpec::new("city", "City", FieldKind::Text),
        FieldSpec::new("pickUpAndDropOff", "Pick-up & drop-off", FieldKind::Text),
        FieldSpec::new("details", "Details", FieldKind::TextArea),
        FieldSpec::new("fullDay", "Full day", FieldKind::Text),
        FieldSpec::new("viewPrice", "View price", FieldKind::Text),
        FieldSpec::new("note", "Note", FieldKind::TextArea),
        FieldSpec::new("languages", "Languages", FieldKind::List),
        FieldSpec::new("media", "Media files", FieldKind::Files),
    ];
    for category in PriceCategory::ALL {
        for tier in PriceTier::ALL {
            fields.push(FieldSpec::new(
                format!("prices.{}.{}", category.key(), tier.key()),
                format!("{} / {}", category.label(), tier.label()),
                FieldKind::Number,
            ));
        }
    }
    FormSchema {
        title: "Tour",
        fields,
    }
}

/// Password is only mandatory when creating.
pub fn user_schema(creating: bool) -> FormSchema {
    let password = FieldSpec::new("password", "Password", FieldKind::Secret);
    FormSchema {
        title: "User",
        fields: vec![
            FieldSpec::new("name", "Name", FieldKind::Text).required(),
            FieldSpec::new("email", "Email", FieldKind::Text).required(),
            FieldSpec::new("role", "Role", FieldKind::Choice(ROLE_OPTIONS)),
            FieldSpec::new("phone", "Phone", FieldKind::Text),
            if creating { password.required() } else { password },
        ],
    }
}

pub fn booking_schema() -> FormSchema {
    FormSchema {
        title: "Booking",
        fields: vec![
            FieldSpec::new("date", "Date", FieldKind::Text),
            FieldSpec::new("time", "Time", FieldKind::Text),
            FieldSpec::new("contact", "Contact", FieldKind::Text),
            FieldSpec::new("status", "Status", FieldKind::Choice(STATUS_OPTIONS)),
            FieldSpec::new("amount", "Amount", FieldKind::Number),
        ],
    }
}
