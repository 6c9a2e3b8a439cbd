// Prompt generation engine
//
// Turns a selected template and the user's field values into a prompt,
// obtains a completion for it and tracks the interactive session.

pub mod client;
pub mod errors;
pub mod prompts;
pub mod session;
pub mod studio;
pub mod types;

// Re-export main types
pub use client::CompletionClient;
pub use errors::{CompletionError, SessionError};
pub use prompts::generate;
pub use session::{Session, SessionSnapshot};
pub use studio::Studio;
