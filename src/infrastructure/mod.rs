// Infrastructure layer module
// Contains storage adapters, the template loader and the completion API client
// Follows Hexagonal Architecture

pub mod completion_client;
pub mod repositories;
pub mod storage;
pub mod templates;
