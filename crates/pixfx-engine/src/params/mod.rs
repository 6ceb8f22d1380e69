//! Effect parameters: schema, values, and per-invocation sets.
//!
//! The schema side ([`ParamSpec`]) is static and declared by each effect.
//! The value side ([`ParamValue`], [`ParamSet`]) comes from the caller and
//! is checked against the schema by the registry before an effect runs.

mod spec;
mod value;

pub use spec::{ChoiceOption, ParamKind, ParamSpec};
pub use value::{ParamSet, ParamValue};

pub(crate) use spec::SpecViolation;
