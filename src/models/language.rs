//! Reference data payloads
//!
//! Languages, interests and translations cached per locale.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of an interest or interest category.
pub type InterestId = i64;

/// Interest (or category) id to display name, for one locale.
pub type Interests = HashMap<InterestId, String>;

/// Translation key to localized text, for one locale.
pub type Translations = HashMap<String, String>;

/// A language as presented to users of a given locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code, e.g. `"en"`
    pub code: String,
    /// Name rendered in the viewing locale
    pub name: String,
    /// Name in the language itself
    pub native_name: String,
}

impl Language {
    /// Creates a new Language
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        native_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            native_name: native_name.into(),
        }
    }
}
