// Template catalogue loading

pub mod template_store;

pub use template_store::{TemplateStore, TEMPLATE_FILES};
