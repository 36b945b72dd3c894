//! Constant scoping for structured-data loading.
//!
//! Formulas embedded in loaded data resolve free identifiers against two
//! sources: a fixed table of environment-derived names (screen metrics,
//! platform flags, key bindings, ...) and a stack of frames populated from
//! the upper-case keys of whatever data node is currently being loaded.

pub mod env;
pub mod registry;
pub mod scope;

pub use env::{Control, Environment, StaticEnvironment};
pub use registry::{builtin_providers, Provider, HEX_DIRECTIONS};
pub use scope::{is_constant_name, ConstantScopes, ScopeGuard};
