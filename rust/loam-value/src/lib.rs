//! Loam value model.
//!
//! Tagged values, the algorithms that combine, traverse, and copy them, and
//! the builder used to assemble new map values from piecewise contributions.

pub mod builder;
pub mod decimal;
pub mod json;
pub mod marshal;
pub mod ops;
pub mod source;
pub mod value;

pub use builder::ValueBuilder;
pub use decimal::Decimal;
pub use marshal::{ivec3_to_value, value_to_ivec3, value_to_vec3, vec3_to_value, MarshalError};
pub use ops::{append, deep_copy, merge_over, parse_list_or_csv, smart_merge, visit, OpsError};
pub use source::SourceInfo;
pub use value::{ObjectData, Value, ValueKind};
