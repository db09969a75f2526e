//! CLI command definitions and handlers

use std::io::Write;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::corpus::{Corpus, VERSE_COUNT};
use crate::locator::{locate_random, search_containing, VerseSource};
use crate::output::{write_match, write_verse, OutputFormat};

/// dhammapada - A daily dose of the Dharma
#[derive(Parser, Debug)]
#[command(name = "dhammapada")]
#[command(version)]
#[command(about = "A daily dose of the Dharma")]
#[command(long_about = "A random verse from the Dhammapada, translated by F. Max Müller.")]
#[command(after_help = "\
EXAMPLES:
    dhammapada                  Show a random verse
    dhammapada -v 183           Show verse 183
    dhammapada hatred           Show every verse mentioning hatred
    dhammapada -c               Random verse, in colour
    dhammapada --seed 7         Same random verse every time

ENVIRONMENT:
    DHAMMAPADA_COLOUR=1         Colour output by default (0/false/no/off to disable)
    NO_COLOR                    Disable colour even with --colour
    RUST_LOG                    Log filter, e.g. dhammapada=debug")]
pub struct Cli {
    /// Print every verse containing this text (case-insensitive)
    #[arg(value_name = "SEARCH")]
    pub search: Option<String>,

    /// Print with colour
    #[arg(
        short,
        long,
        visible_alias = "color",
        env = "DHAMMAPADA_COLOUR",
        value_parser = FalseyValueParser::new()
    )]
    pub colour: bool,

    /// Specify a verse number (1-423); zero or less picks at random
    #[arg(
        short,
        long,
        default_value_t = 0,
        value_name = "N",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..=u32::MAX as i64)
    )]
    pub verse: i64,

    /// Seed the random verse choice
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Search(String),
    Verse(u32),
    Random { seed: Option<u64> },
}

impl Cli {
    /// A search string wins over `--verse`; with neither, pick at random
    pub fn mode(&self) -> Mode {
        match self.search.as_deref() {
            Some(s) if !s.is_empty() => Mode::Search(s.to_string()),
            _ => match u32::try_from(self.verse) {
                Ok(number) if number > 0 => Mode::Verse(number),
                _ => Mode::Random { seed: self.seed },
            },
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.colour {
            OutputFormat::Colour
        } else {
            OutputFormat::Plain
        }
    }
}

/// Exit status for a failed parse: help and version are not failures
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Run a parsed command line against the embedded text
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let corpus = Corpus::embedded().context("Failed to load the Dhammapada text")?;
    debug!(
        verses = corpus.len(),
        chapters = corpus.chapters().len(),
        "Loaded corpus"
    );
    run_with(corpus, cli, out)
}

/// Run a parsed command line against any verse source
pub fn run_with<S, W>(source: &S, cli: &Cli, out: &mut W) -> Result<()>
where
    S: VerseSource + ?Sized,
    W: Write,
{
    let format = cli.output_format();
    let mode = cli.mode();
    debug!(?mode, ?format, "Running");

    match mode {
        Mode::Search(needle) => cmd_search(source, &needle, format, out).map(|_| ()),
        Mode::Verse(number) => cmd_verse(source, number, format, out),
        Mode::Random { seed } => cmd_random(source, seed, format, out),
    }
}

/// Print every matching verse as it is found; returns the match count
pub fn cmd_search<S, W>(source: &S, needle: &str, format: OutputFormat, out: &mut W) -> Result<usize>
where
    S: VerseSource + ?Sized,
    W: Write,
{
    let mut count = 0;
    for verse in search_containing(source, needle) {
        write_match(out, &verse, format)?;
        count += 1;
    }
    debug!(needle, count, "Search finished");
    Ok(count)
}

/// Print a verse by number
pub fn cmd_verse<S, W>(source: &S, number: u32, format: OutputFormat, out: &mut W) -> Result<()>
where
    S: VerseSource + ?Sized,
    W: Write,
{
    if number > VERSE_COUNT {
        warn!(verse = number, "Verse numbers run from 1 to {}", VERSE_COUNT);
    }
    let verse = source
        .locate(number)
        .with_context(|| format!("Error getting verse {}", number))?;
    write_verse(out, &verse, format)
}

/// Print a random verse, reproducibly when seeded
pub fn cmd_random<S, W>(source: &S, seed: Option<u64>, format: OutputFormat, out: &mut W) -> Result<()>
where
    S: VerseSource + ?Sized,
    W: Write,
{
    let verse = match seed {
        Some(seed) => locate_random(source, &mut StdRng::seed_from_u64(seed)),
        None => locate_random(source, &mut rand::thread_rng()),
    }
    .context("Error getting random verse")?;
    write_verse(out, &verse, format)
}
