// Repository implementations (data access layer)
// Built on the KeyValueStore port

pub mod credential_store;
pub mod result_archive;

pub use credential_store::CredentialStore;
pub use result_archive::ResultArchive;
