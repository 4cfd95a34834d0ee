//! fieldcast - A strict, deterministic field-typing and value-coercion layer
//! for record extraction pipelines.

pub mod fields;
