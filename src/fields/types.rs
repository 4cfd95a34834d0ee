//! Field definitions and the base field contract.
//!
//! A field definition is constructed once, typically at schema-definition
//! time, and is stateless thereafter; `assign` and `to_value` are pure
//! per-call operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coerce::collapse;
use super::errors::{FieldResult, FieldValueError};
use super::value::Value;

/// The six scalar field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Truthiness of any input; never fails
    Boolean,
    /// Calendar date
    Date,
    /// Arbitrary-precision decimal
    Decimal,
    /// 64-bit floating point
    Float,
    /// 64-bit signed integer
    Integer,
    /// UTF-8 text
    String,
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Decimal => "decimal",
            FieldKind::Float => "float",
            FieldKind::Integer => "integer",
            FieldKind::String => "string",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Base contract shared by scalar and multi-valued fields.
///
/// `assign` is the caller-facing entry point, `to_value` the raw conversion.
/// By default `assign` forwards to `to_value` unchanged; scalar fields
/// override it to collapse a sequence of text fragments into one value first.
pub trait Field {
    /// Whether the consuming record layer must see a value for this field
    fn is_required(&self) -> bool;

    /// The canonical default used when no value was extracted
    fn default(&self) -> &Value;

    /// Converts a raw value into this field's canonical representation.
    fn to_value(&self, value: &Value) -> FieldResult<Value>;

    /// Accepts a raw extracted value.
    fn assign(&self, value: &Value) -> FieldResult<Value> {
        self.to_value(value)
    }
}

/// A scalar field descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data kind
    pub kind: FieldKind,
    /// Whether a value must be present
    pub required: bool,
    /// Canonical default, always a valid instance of the kind
    pub default: Value,
}

impl FieldDef {
    /// Create an optional field of the given kind. The default is the
    /// kind's empty representation, so it is always canonically typed.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            default: kind.empty_value(),
        }
    }

    /// Create a required field of the given kind
    pub fn required(kind: FieldKind) -> Self {
        Self {
            required: true,
            ..Self::new(kind)
        }
    }

    /// Create an optional field with an explicit canonical default
    pub fn with_default(kind: FieldKind, default: Value) -> Self {
        Self {
            default,
            ..Self::new(kind)
        }
    }

    /// Optional boolean field
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    /// Optional date field
    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    /// Optional decimal field
    pub fn decimal() -> Self {
        Self::new(FieldKind::Decimal)
    }

    /// Optional float field
    pub fn float() -> Self {
        Self::new(FieldKind::Float)
    }

    /// Optional integer field
    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    /// Optional string field
    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }
}

impl Field for FieldDef {
    fn is_required(&self) -> bool {
        self.required
    }

    fn default(&self) -> &Value {
        &self.default
    }

    fn to_value(&self, value: &Value) -> FieldResult<Value> {
        self.kind.coerce(value)
    }

    /// A sequence of text fragments (e.g. multiple matches from an
    /// extraction) is collapsed into one space-joined value, then coerced.
    fn assign(&self, value: &Value) -> FieldResult<Value> {
        match value {
            Value::List(items) => self.to_value(&Value::Text(collapse(items)?)),
            _ => self.to_value(value),
        }
    }
}

/// A field whose canonical value is an ordered list of one scalar kind.
///
/// Elements are coerced independently and in input order; the first failing
/// element propagates immediately. Values assigned to a multi-valued field
/// are never collapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiValuedField {
    /// Scalar kind of each element
    pub element: FieldKind,
    /// Whether a value must be present
    pub required: bool,
    /// Canonical default, always a list
    pub default: Value,
}

impl MultiValuedField {
    /// Create an optional multi-valued field over the given element kind
    pub fn new(element: FieldKind) -> Self {
        Self {
            element,
            required: false,
            default: Value::List(Vec::new()),
        }
    }

    /// Create a required multi-valued field
    pub fn required(element: FieldKind) -> Self {
        Self {
            required: true,
            ..Self::new(element)
        }
    }

    /// Create an optional multi-valued field with an explicit default list
    pub fn with_default(element: FieldKind, default: Value) -> Self {
        Self {
            default,
            ..Self::new(element)
        }
    }
}

impl Field for MultiValuedField {
    fn is_required(&self) -> bool {
        self.required
    }

    fn default(&self) -> &Value {
        &self.default
    }

    fn to_value(&self, value: &Value) -> FieldResult<Value> {
        match value {
            Value::Null => Ok(Value::List(Vec::new())),
            Value::List(items) => items
                .iter()
                .map(|item| self.element.coerce(item))
                .collect::<FieldResult<Vec<_>>>()
                .map(Value::List),
            _ => Err(FieldValueError::new("This value must be a sequence.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_canonically_typed() {
        assert_eq!(FieldDef::boolean().default, Value::Bool(false));
        assert_eq!(FieldDef::integer().default, Value::Null);
        assert_eq!(FieldDef::string().default, Value::Null);
        assert_eq!(
            MultiValuedField::new(FieldKind::Integer).default,
            Value::List(vec![])
        );
    }

    #[test]
    fn test_required_defaults_to_false() {
        assert!(!FieldDef::integer().required);
        assert!(FieldDef::required(FieldKind::Integer).required);
        assert!(!MultiValuedField::new(FieldKind::String).required);
        assert!(MultiValuedField::required(FieldKind::String).required);
    }

    #[test]
    fn test_explicit_default_is_honored() {
        let def = FieldDef::with_default(FieldKind::Integer, Value::Int(7));
        assert_eq!(def.default, Value::Int(7));
    }

    #[test]
    fn test_scalar_assign_collapses_text_fragments() {
        let def = FieldDef::string();
        let raw = Value::from(vec!["a", "b", "c"]);
        assert_eq!(def.assign(&raw).unwrap(), Value::Text("a b c".into()));
    }

    #[test]
    fn test_scalar_assign_rejects_non_text_fragments() {
        let def = FieldDef::string();
        let raw = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert!(def.assign(&raw).is_err());
    }

    #[test]
    fn test_multi_valued_assign_does_not_collapse() {
        let field = MultiValuedField::new(FieldKind::String);
        let raw = Value::from(vec!["a", "b"]);
        assert_eq!(
            field.assign(&raw).unwrap(),
            Value::List(vec![Value::Text("a".into()), Value::Text("b".into())])
        );
    }

    #[test]
    fn test_multi_valued_rejects_scalar_text() {
        // Text is a scalar here, never a sequence of characters.
        let field = MultiValuedField::new(FieldKind::String);
        assert!(field.to_value(&Value::Text("abc".into())).is_err());
    }

    #[test]
    fn test_fields_share_the_base_contract() {
        let fields: Vec<Box<dyn Field>> = vec![
            Box::new(FieldDef::integer()),
            Box::new(MultiValuedField::new(FieldKind::Integer)),
        ];
        for field in &fields {
            assert!(!field.is_required());
            assert!(field.to_value(&Value::Null).is_ok());
        }
    }

    #[test]
    fn test_kind_serde_tags_are_lowercase() {
        let json = serde_json::to_string(&FieldKind::Integer).unwrap();
        assert_eq!(json, "\"integer\"");
        let kind: FieldKind = serde_json::from_str("\"date\"").unwrap();
        assert_eq!(kind, FieldKind::Date);
    }

    #[test]
    fn test_field_def_serde_round_trip() {
        let def = FieldDef::required(FieldKind::Decimal);
        let json = serde_json::to_string(&def).unwrap();
        let back: FieldDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
