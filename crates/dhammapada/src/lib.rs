//! dhammapada - A daily dose of the Dharma
//!
//! "All that we are is the result of what we have thought."
//!
//! Prints verses from the Dhammapada (F. Max Muller's translation), which is
//! compiled into the binary and parsed once at startup.
//!
//! Lookups:
//! - by number: `locate` on any [`VerseSource`]
//! - at random: [`locate_random`] with an injected RNG
//! - by text: [`search_containing`], a lazy case-insensitive search

pub mod cli;
pub mod corpus;
pub mod error;
pub mod locator;
pub mod output;
pub mod tokenizer;
pub mod verse;

pub use corpus::{Corpus, VERSE_COUNT};
pub use error::ScanError;
pub use locator::{locate_random, search_containing, ScanningLocator, VerseSource};
pub use verse::Verse;
