//! Payload models for the cache namespaces
//!
//! These are the value types stored in the typed namespaces. They are
//! populated by external collaborators (repositories, localization loaders).

pub mod language;
pub mod user;

// Re-export commonly used types
pub use language::{InterestId, Interests, Language, Translations};
pub use user::{NamedStats, User, UserId};
