// Template domain module
// Contains the framework template aggregate and its placeholder value objects

#![allow(clippy::module_inception)]

pub mod template;
pub mod value_objects;

// Re-export main types for convenience
pub use template::{marker_pattern, Template, TemplateError, TemplateResult};
pub use value_objects::{Placeholder, PlaceholderKind};
