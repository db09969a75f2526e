//! Verse lookup: by number, at random, or by substring search.
//!
//! Every operation goes through [`VerseSource::locate`]. The parsed
//! [`Corpus`] is the normal source and the only one the binary uses.
//! [`ScanningLocator`] is a reference implementation: it walks the raw text
//! line by line on every call, and the tests check the parsed corpus
//! against it.

use std::io::BufRead;

use rand::Rng;
use tracing::{debug, warn};

use crate::corpus::{Corpus, VERSE_COUNT};
use crate::error::ScanError;
use crate::tokenizer::{verse_number, Line, LineTokenizer};
use crate::verse::Verse;

/// Anything that can produce a verse by number.
///
/// A number with no verse is not an error: implementations return
/// [`Verse::missing`].
pub trait VerseSource {
    fn locate(&self, number: u32) -> Result<Verse, ScanError>;
}

impl VerseSource for Corpus {
    fn locate(&self, number: u32) -> Result<Verse, ScanError> {
        Ok(self
            .get(number)
            .cloned()
            .unwrap_or_else(|| Verse::missing(number)))
    }
}

impl<S: VerseSource + ?Sized> VerseSource for &S {
    fn locate(&self, number: u32) -> Result<Verse, ScanError> {
        (**self).locate(number)
    }
}

/// Pick a verse uniformly from `1..=VERSE_COUNT`
pub fn locate_random<S, R>(source: &S, rng: &mut R) -> Result<Verse, ScanError>
where
    S: VerseSource + ?Sized,
    R: Rng + ?Sized,
{
    let number = rng.gen_range(1..=VERSE_COUNT);
    debug!(verse = number, "Picked random verse");
    source.locate(number)
}

/// Lazily yield every verse whose text contains `needle`, ignoring case.
///
/// Numbers `1..=VERSE_COUNT` are visited in order. A lookup that fails is
/// logged and skipped; verses the source does not have are skipped too, so
/// an empty needle yields exactly the verses present.
pub fn search_containing<'a, S>(source: &'a S, needle: &str) -> Matches<'a, S>
where
    S: VerseSource + ?Sized,
{
    Matches {
        source,
        needle: needle.to_lowercase(),
        next: 1,
    }
}

/// Iterator returned by [`search_containing`]
pub struct Matches<'a, S: ?Sized> {
    source: &'a S,
    needle: String,
    next: u32,
}

impl<S: VerseSource + ?Sized> Iterator for Matches<'_, S> {
    type Item = Verse;

    fn next(&mut self) -> Option<Verse> {
        while self.next <= VERSE_COUNT {
            let number = self.next;
            self.next += 1;

            match self.source.locate(number) {
                Ok(verse) if !verse.is_empty() && verse.contains_lowercase(&self.needle) => {
                    return Some(verse);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(verse = number, error = %e, "Skipping verse that could not be read");
                }
            }
        }
        None
    }
}

/// Reference locator that rescans the raw text from the top on every lookup.
///
/// Not used by the CLI; it exists to cross-check [`Corpus`] and to exercise
/// per-lookup read failures.
///
/// Tracks the latest chapter header until the wanted verse starts, then
/// collects lines up to the next blank line.
pub struct ScanningLocator<'a> {
    text: &'a [u8],
    tokenizer: LineTokenizer,
}

impl<'a> ScanningLocator<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Raw bytes; invalid UTF-8 surfaces as [`ScanError::Io`] at lookup time
    pub fn from_bytes(text: &'a [u8]) -> Self {
        Self {
            text,
            tokenizer: LineTokenizer::new(),
        }
    }
}

impl VerseSource for ScanningLocator<'_> {
    fn locate(&self, number: u32) -> Result<Verse, ScanError> {
        scan_for_verse(self.text, &self.tokenizer, number)
    }
}

fn scan_for_verse<R: BufRead>(
    reader: R,
    tokenizer: &LineTokenizer,
    number: u32,
) -> Result<Verse, ScanError> {
    let mut in_verse = false;
    let mut chapter = String::new();
    let mut text = String::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ScanError::io(idx + 1, e))?;
        let line = line.trim_end_matches('\r');
        let token = tokenizer.classify(line);

        if in_verse {
            if token == Line::Blank {
                break;
            }
            text.push_str(line);
            text.push('\n');
            continue;
        }

        match token {
            Line::Chapter(header) => chapter = header.to_string(),
            Line::VerseStart { digits, text: rest } if verse_number(digits) == Some(number) => {
                in_verse = true;
                text.push_str(rest);
                text.push('\n');
            }
            _ => {}
        }
    }

    if !in_verse {
        return Ok(Verse::missing(number));
    }

    Ok(Verse {
        number,
        chapter,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::EMBEDDED_TEXT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn corpus() -> &'static Corpus {
        Corpus::embedded().expect("embedded corpus parses")
    }

    #[test]
    fn test_every_verse_is_present() -> Result<(), ScanError> {
        let corpus = corpus();
        for n in 1..=VERSE_COUNT {
            let verse = corpus.locate(n)?;
            assert!(!verse.is_empty(), "verse {n} is empty");
            assert!(verse.label().ends_with(&format!(", verse {n}")));
            assert!(verse.text.ends_with('\n'));
        }
        Ok(())
    }

    #[test]
    fn test_number_prefix_is_stripped() -> Result<(), ScanError> {
        let corpus = corpus();
        for n in 1..=VERSE_COUNT {
            let verse = corpus.locate(n)?;
            assert!(
                !verse.text.starts_with(&format!("{n}.")),
                "verse {n} still carries its number"
            );
        }
        Ok(())
    }

    #[test]
    fn test_first_verse() -> Result<(), ScanError> {
        let verse = corpus().locate(1)?;
        assert_eq!(verse.label(), "Chapter I. The Twin-Verses, verse 1");
        assert!(verse
            .text
            .starts_with("All that we are is the result of what we have thought:"));
        assert!(verse
            .text
            .trim_end()
            .ends_with("as the wheel follows the foot of\nthe ox that draws the carriage."));
        Ok(())
    }

    #[test]
    fn test_out_of_range_is_soft_empty() -> Result<(), ScanError> {
        let scanning = ScanningLocator::new(EMBEDDED_TEXT);
        let sources: [&dyn VerseSource; 2] = [corpus(), &scanning];
        for source in sources {
            let verse = source.locate(424)?;
            assert!(verse.is_empty());
            assert_eq!(verse.label(), ", verse 424");

            let verse = source.locate(0)?;
            assert!(verse.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_scanning_agrees_with_corpus() -> Result<(), ScanError> {
        let scanning = ScanningLocator::new(EMBEDDED_TEXT);
        let corpus = corpus();
        for n in 1..=VERSE_COUNT + 2 {
            assert_eq!(scanning.locate(n)?, corpus.locate(n)?, "verse {n} differs");
        }
        Ok(())
    }

    #[test]
    fn test_scanning_read_failure() {
        let scanning = ScanningLocator::from_bytes(b"Chapter I\n\n\xff\n\n1. x\n");
        let err = scanning.locate(1).unwrap_err();
        assert!(matches!(err, ScanError::Io { line: 3, .. }));
    }

    #[test]
    fn test_search_matches_case_insensitively() -> Result<(), ScanError> {
        let corpus = corpus();
        let found: Vec<Verse> = search_containing(corpus, "HATRED").collect();
        assert!(!found.is_empty());
        assert!(found.iter().any(|v| v.number == 5));

        // Exactly the set a brute-force filter gives, in ascending order
        let mut expected = Vec::new();
        for n in 1..=VERSE_COUNT {
            let verse = corpus.locate(n)?;
            if verse.text.to_lowercase().contains("hatred") {
                expected.push(n);
            }
        }
        let numbers: Vec<u32> = found.iter().map(|v| v.number).collect();
        assert_eq!(numbers, expected);
        Ok(())
    }

    #[test]
    fn test_search_empty_needle_returns_all() {
        let all: Vec<u32> = search_containing(corpus(), "").map(|v| v.number).collect();
        assert_eq!(all.len(), VERSE_COUNT as usize);
        assert_eq!(all.first(), Some(&1));
        assert_eq!(all.last(), Some(&VERSE_COUNT));
    }

    #[test]
    fn test_search_no_match_is_empty() {
        assert_eq!(search_containing(corpus(), "quantum chromodynamics").count(), 0);
    }

    #[test]
    fn test_search_is_lazy() {
        let mut matches = search_containing(corpus(), "earnestness");
        let first = matches.next().expect("a match");
        assert_eq!(first.number, 21);
        assert_eq!(first.chapter, "Chapter II. On Earnestness");
    }

    /// Fails for every multiple of three
    struct Flaky<'a>(&'a Corpus);

    impl VerseSource for Flaky<'_> {
        fn locate(&self, number: u32) -> Result<Verse, ScanError> {
            if number % 3 == 0 {
                return Err(ScanError::InvalidVerseNumber {
                    line: number as usize,
                    number: number.to_string(),
                });
            }
            self.0.locate(number)
        }
    }

    #[test]
    fn test_search_skips_failed_lookups() {
        let flaky = Flaky(corpus());
        let numbers: Vec<u32> = search_containing(&flaky, "").map(|v| v.number).collect();
        assert_eq!(numbers.len(), (VERSE_COUNT - VERSE_COUNT / 3) as usize);
        assert!(numbers.iter().all(|n| n % 3 != 0));
    }

    #[test]
    fn test_search_on_small_corpus() -> Result<(), ScanError> {
        let corpus = Corpus::parse("Chapter X\n\n1. Alpha\n\n2. beta ALPHA\n\n3. gamma\n")?;
        let numbers: Vec<u32> = search_containing(&corpus, "alpha").map(|v| v.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(search_containing(&corpus, "").count(), 3);
        Ok(())
    }

    #[test]
    fn test_random_is_in_range_and_varied() -> Result<(), ScanError> {
        let corpus = corpus();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let verse = locate_random(corpus, &mut rng)?;
            assert!((1..=VERSE_COUNT).contains(&verse.number));
            assert!(!verse.is_empty());
            seen.insert(verse.number);
        }
        assert!(seen.len() > 50);
        Ok(())
    }

    #[test]
    fn test_random_is_reproducible_with_seed() -> Result<(), ScanError> {
        let corpus = corpus();
        let a = locate_random(corpus, &mut StdRng::seed_from_u64(42))?;
        let b = locate_random(corpus, &mut StdRng::seed_from_u64(42))?;
        assert_eq!(a, b);
        Ok(())
    }
}
