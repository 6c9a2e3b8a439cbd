//! Framework Prompt Studio Library
//!
//! Turns business-analysis framework templates and user-entered fields into
//! LLM prompts, obtains completions and keeps a bounded history of results.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infrastructure;
