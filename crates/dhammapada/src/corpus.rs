//! The verse text and its one-time structured parse.
//!
//! The F. Max Muller translation is compiled into the binary. It is parsed
//! once per process into a map from verse number to [`Verse`], so lookups
//! and searches never rescan the text.

use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::ScanError;
use crate::tokenizer::{verse_number, Line, LineTokenizer};
use crate::verse::Verse;

/// The full text, as shipped with the binary
pub const EMBEDDED_TEXT: &str = include_str!("../corpus/dhammapada.txt");

/// Number of verses in the Dhammapada
pub const VERSE_COUNT: u32 = 423;

static EMBEDDED: OnceLock<Result<Corpus, ScanError>> = OnceLock::new();

/// Parsed verses indexed by number
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    verses: BTreeMap<u32, Verse>,
    chapters: Vec<String>,
}

/// A verse whose lines are still being collected
struct OpenVerse {
    number: u32,
    chapter: String,
    text: String,
}

impl Corpus {
    /// The embedded text, parsed on first use
    pub fn embedded() -> Result<&'static Corpus, ScanError> {
        EMBEDDED
            .get_or_init(|| Corpus::parse(EMBEDDED_TEXT))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn parse(text: &str) -> Result<Self, ScanError> {
        Self::from_reader(text.as_bytes())
    }

    /// Parse a corpus from any line source.
    ///
    /// A verse runs from its numbered line up to the next blank line, chapter
    /// header, or numbered line. Prose outside any verse (title, preface) is
    /// skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ScanError> {
        let tokenizer = LineTokenizer::new();
        let mut corpus = Corpus::default();
        let mut first_seen: HashMap<u32, usize> = HashMap::new();
        let mut chapter = String::new();
        let mut open: Option<OpenVerse> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| ScanError::io(line_no, e))?;
            let line = line.trim_end_matches('\r');

            match tokenizer.classify(line) {
                Line::Blank => corpus.close(&mut open),
                Line::Chapter(header) => {
                    corpus.close(&mut open);
                    chapter = header.to_string();
                    corpus.chapters.push(chapter.clone());
                }
                Line::VerseStart { digits, text } => {
                    corpus.close(&mut open);
                    let number =
                        verse_number(digits).ok_or_else(|| ScanError::InvalidVerseNumber {
                            line: line_no,
                            number: digits.to_string(),
                        })?;
                    if let Some(&first) = first_seen.get(&number) {
                        return Err(ScanError::DuplicateVerse {
                            verse: number,
                            first,
                            line: line_no,
                        });
                    }
                    first_seen.insert(number, line_no);

                    let mut body = String::with_capacity(256);
                    body.push_str(text);
                    body.push('\n');
                    open = Some(OpenVerse {
                        number,
                        chapter: chapter.clone(),
                        text: body,
                    });
                }
                Line::Continuation(text) => {
                    if let Some(verse) = open.as_mut() {
                        verse.text.push_str(text);
                        verse.text.push('\n');
                    }
                }
            }
        }
        corpus.close(&mut open);

        debug!(
            verses = corpus.verses.len(),
            chapters = corpus.chapters.len(),
            "Parsed corpus"
        );
        Ok(corpus)
    }

    fn close(&mut self, open: &mut Option<OpenVerse>) {
        if let Some(verse) = open.take() {
            self.verses.insert(
                verse.number,
                Verse {
                    number: verse.number,
                    chapter: verse.chapter,
                    text: verse.text,
                },
            );
        }
    }

    pub fn get(&self, number: u32) -> Option<&Verse> {
        self.verses.get(&number)
    }

    /// All verses in ascending order
    pub fn verses(&self) -> impl Iterator<Item = &Verse> {
        self.verses.values()
    }

    /// Chapter headers in the order they appear
    pub fn chapters(&self) -> &[String] {
        &self.chapters
    }

    /// Highest verse number present
    pub fn max_verse(&self) -> Option<u32> {
        self.verses.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
