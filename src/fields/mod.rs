//! Field typing and value coercion for extracted records.
//!
//! Raw extracted data (text fragments, numbers, sequences of fragments) is
//! normalized into canonical typed values before persistence. Attaching
//! failures to field names and composing fields into records belongs to the
//! consuming record layer, not here.
//!
//! # Design Principles
//!
//! - Coercion is pure and deterministic
//! - Definitions are immutable and freely shareable
//! - `Null` coercion is total and yields each kind's empty representation
//! - A single error kind carries every validation failure

mod coerce;
mod errors;
mod types;
mod value;

pub use errors::{FieldResult, FieldValueError};
pub use types::{Field, FieldDef, FieldKind, MultiValuedField};
pub use value::Value;
