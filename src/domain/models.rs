use crate::error::TaggerError;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Sites,
    Elements,
    Interfaces,
    CircuitCategories,
}

impl ObjectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Sites => "sites",
            ObjectKind::Elements => "elements",
            ObjectKind::Interfaces => "interfaces",
            ObjectKind::CircuitCategories => "circuitcategories",
        }
    }

    /// Interfaces are addressed through their parent site and element.
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, ObjectKind::Interfaces)
    }
}

impl FromStr for ObjectKind {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sites" => Ok(ObjectKind::Sites),
            "elements" => Ok(ObjectKind::Elements),
            "interfaces" => Ok(ObjectKind::Interfaces),
            // older releases shipped the misspelled name
            "circuitcategories" | "circuitcatagories" => Ok(ObjectKind::CircuitCategories),
            _ => Err(TaggerError::UnsupportedObject(s.to_string())),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Add,
    Remove,
}

impl TagAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagAction::Add => "add",
            TagAction::Remove => "remove",
        }
    }
}

impl fmt::Display for TagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of one object field, as seen by the predicate matcher.
///
/// Text form used for matching and reporting:
/// - `Absent` (missing key or JSON null) renders as the empty string.
/// - `Scalar` holds strings verbatim; numbers and booleans use their JSON
///   spelling (`42`, `1.5`, `true`).
/// - `Structured` (arrays and objects) renders as compact JSON, e.g.
///   `["a","b"]` or `{"k":1}`, object keys sorted.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Scalar(String),
    Structured(Value),
}

impl FieldValue {
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Absent,
            Some(Value::String(s)) => FieldValue::Scalar(s.clone()),
            Some(Value::Bool(b)) => FieldValue::Scalar(b.to_string()),
            Some(Value::Number(n)) => FieldValue::Scalar(n.to_string()),
            Some(other) => FieldValue::Structured(other.clone()),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Absent => String::new(),
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::Structured(v) => v.to_string(),
        }
    }
}

/// One remote record (site, element, interface, circuit category).
///
/// Fields other than `id`, `name` and `tags` are opaque and passed through
/// on update untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggableObject(Map<String, Value>);

impl TaggableObject {
    /// Non-object JSON (which the controller should never send in `items`)
    /// becomes an empty object.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> FieldValue {
        FieldValue::from_json(self.get(key))
    }

    /// Tags exactly as stored, duplicates included. Missing or null is empty;
    /// non-string entries are ignored.
    pub fn raw_tags(&self) -> Vec<String> {
        match self.0.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn with_tags(&self, tags: Vec<String>) -> Self {
        self.with_field("tags", Value::from(tags))
    }

    pub fn with_field(&self, key: &str, value: Value) -> Self {
        let mut fields = self.0.clone();
        fields.insert(key.to_string(), value);
        Self(fields)
    }

    pub fn retain_fields(&self, allowed: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| allowed.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Value> for TaggableObject {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matched: bool,
    pub name: Option<String>,
    pub value: FieldValue,
}

/// Field name plus the compiled pattern tested against its text form.
/// The pattern only matches at the start of the text.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub key: String,
    pub pattern: Regex,
}

impl FieldPattern {
    pub fn compile(key: &str, pattern: &str) -> Result<Self, TaggerError> {
        let compiled = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| TaggerError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            key: key.to_string(),
            pattern: compiled,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[derive(Debug, Clone)]
pub struct TagRequest {
    pub tag: String,
    pub action: TagAction,
    pub simulate: bool,
    pub object: FieldPattern,
}

/// Parent predicates used when walking interfaces.
#[derive(Debug, Clone)]
pub struct ParentFilters {
    pub site: FieldPattern,
    pub element: FieldPattern,
}
