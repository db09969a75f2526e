//! The verse value returned by every lookup

use serde::Serialize;

/// A single verse and the chapter it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    /// Ordinal number, 1 through 423
    #[serde(rename = "verse")]
    pub number: u32,
    /// Chapter header as written in the text, empty when unknown
    pub chapter: String,
    /// Verse body with the number stripped; every line ends in `\n`
    pub text: String,
}

impl Verse {
    /// The soft "not found" result: no text and no chapter
    pub fn missing(number: u32) -> Self {
        Self {
            number,
            chapter: String::new(),
            text: String::new(),
        }
    }

    /// `"<chapter>, verse <n>"`
    pub fn label(&self) -> String {
        format!("{}, verse {}", self.chapter, self.number)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Case-insensitive substring test. `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
    }
}
