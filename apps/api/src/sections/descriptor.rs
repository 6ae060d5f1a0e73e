use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::sections::contact::ContactEntry;

/// How a renderer should lay a section out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Scalar,
    ListOfScalars,
    ListOfObjects,
    Object,
    ContactBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Number(Number),
}

/// Section payload. The variant is the kind, so a descriptor's value can never
/// disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum SectionBody {
    Scalar(ScalarValue),
    ListOfScalars(Vec<Value>),
    ListOfObjects(Vec<Value>),
    Object(Map<String, Value>),
    ContactBlock(Vec<ContactEntry>),
}

impl SectionBody {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionBody::Scalar(_) => SectionKind::Scalar,
            SectionBody::ListOfScalars(_) => SectionKind::ListOfScalars,
            SectionBody::ListOfObjects(_) => SectionKind::ListOfObjects,
            SectionBody::Object(_) => SectionKind::Object,
            SectionBody::ContactBlock(_) => SectionKind::ContactBlock,
        }
    }

    /// Body for a value judged purely by its runtime shape.
    ///
    /// - non-empty list of primitives → list-of-scalars
    /// - non-empty list with any object or list inside → list-of-objects
    /// - object → object
    /// - string or number → scalar
    ///
    /// Null, booleans and empty lists have no render kind.
    pub fn from_shape(value: &Value) -> Option<SectionBody> {
        match value {
            Value::String(s) => Some(SectionBody::Scalar(ScalarValue::Text(s.clone()))),
            Value::Number(n) => Some(SectionBody::Scalar(ScalarValue::Number(n.clone()))),
            Value::Array(items) if items.is_empty() => None,
            Value::Array(items) if items.iter().all(is_primitive) => {
                Some(SectionBody::ListOfScalars(items.clone()))
            }
            Value::Array(items) => Some(SectionBody::ListOfObjects(items.clone())),
            Value::Object(map) => Some(SectionBody::Object(map.clone())),
            Value::Null | Value::Bool(_) => None,
        }
    }
}

fn is_primitive(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// One render directive: `{key, label, kind, value}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionDescriptor {
    pub key: String,
    pub label: String,
    /// Only the identity section carries one: the record's `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl SectionDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, body: SectionBody) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            subtitle: None,
            body,
        }
    }
}
