//! Scalar coercion: raw values into canonical representations.
//!
//! Coercion semantics per kind:
//! - Boolean: truthiness of any input, total
//! - Date: date/datetime passthrough (time truncated), or `YYYY-MM-DD` text
//! - Decimal, Float, Integer: number or numeric text
//! - String: text passthrough only
//!
//! `Null` never fails for any kind; it coerces to the kind's empty
//! representation. Already-canonical values coerce to themselves.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::errors::{FieldResult, FieldValueError};
use super::types::FieldKind;
use super::value::Value;

/// Gate for date text: year-month-day, 1 to 4 digit year.
static ANSI_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,4}-\d{1,2}-\d{1,2}$").expect("date pattern compiles"));

impl FieldKind {
    /// The designated empty representation of this kind, used as the
    /// built-in default: `false` for booleans, `Null` otherwise.
    pub fn empty_value(&self) -> Value {
        match self {
            FieldKind::Boolean => Value::Bool(false),
            _ => Value::Null,
        }
    }

    /// Converts a raw value into this kind's canonical representation.
    pub fn coerce(&self, value: &Value) -> FieldResult<Value> {
        match self {
            FieldKind::Boolean => Ok(Value::Bool(value.is_truthy())),
            FieldKind::Date => coerce_date(value),
            FieldKind::Decimal => coerce_decimal(value),
            FieldKind::Float => coerce_float(value),
            FieldKind::Integer => coerce_integer(value),
            FieldKind::String => coerce_string(value),
        }
    }
}

fn coerce_date(value: &Value) -> FieldResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::DateTime(dt) => Ok(Value::Date(dt.date())),
        Value::Text(s) if ANSI_DATE_RE.is_match(s) => parse_ansi_date(s),
        _ => Err(FieldValueError::new(
            "Enter a valid date in YYYY-MM-DD format.",
        )),
    }
}

fn parse_ansi_date(s: &str) -> FieldResult<Value> {
    let mut numbers = s.split('-').map(str::parse::<u32>);
    // The gate guarantees three in-range numeric parts.
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(year)), Some(Ok(month)), Some(Ok(day))) => {
            NaiveDate::from_ymd_opt(year as i32, month, day)
                .map(Value::Date)
                .ok_or_else(|| FieldValueError::new(format!("Invalid date: {}.", s)))
        }
        _ => Err(FieldValueError::new(
            "Enter a valid date in YYYY-MM-DD format.",
        )),
    }
}

fn coerce_decimal(value: &Value) -> FieldResult<Value> {
    let fail = || FieldValueError::new("This value must be a decimal number.");
    match value {
        Value::Null => Ok(Value::Null),
        Value::Decimal(d) => Ok(Value::Decimal(*d)),
        Value::Int(n) => Ok(Value::Decimal(Decimal::from(*n))),
        Value::Float(f) => Decimal::from_f64(*f).map(Value::Decimal).ok_or_else(fail),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(s))
                .map(Value::Decimal)
                .map_err(|_| fail())
        }
        _ => Err(fail()),
    }
}

fn coerce_float(value: &Value) -> FieldResult<Value> {
    let fail = || FieldValueError::new("This value must be a float.");
    match value {
        Value::Null => Ok(Value::Null),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Decimal(d) => d.to_f64().map(Value::Float).ok_or_else(fail),
        Value::Text(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| fail()),
        _ => Err(fail()),
    }
}

fn coerce_integer(value: &Value) -> FieldResult<Value> {
    let fail = || FieldValueError::new("This value must be an integer.");
    match value {
        Value::Null => Ok(Value::Null),
        Value::Int(n) => Ok(Value::Int(*n)),
        // Truncation toward zero; non-finite floats fall through and fail.
        Value::Float(f) if f.is_finite() => Ok(Value::Int(f.trunc() as i64)),
        Value::Decimal(d) => d.trunc().to_i64().map(Value::Int).ok_or_else(fail),
        Value::Text(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| fail()),
        _ => Err(fail()),
    }
}

fn coerce_string(value: &Value) -> FieldResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Text(s) => Ok(Value::Text(s.clone())),
        _ => Err(FieldValueError::new("This field must be a string.")),
    }
}

/// Joins a sequence of text fragments into one space-separated string.
/// Every element must be text.
pub(crate) fn collapse(items: &[Value]) -> FieldResult<String> {
    let mut fragments = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Text(s) => fragments.push(s.as_str()),
            _ => {
                return Err(FieldValueError::new(
                    "This value must be a sequence of strings.",
                ))
            }
        }
    }
    Ok(fragments.join(" "))
}
