//! Output formatting for verses

use std::io::Write;

use anyhow::Result;
use colored::*;
use serde::Serialize;

use crate::verse::Verse;

/// How verses are written to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    /// Bold white text, italic blue label
    Colour,
    Json,
}

/// JSON shape of a verse: the verse fields plus its label
#[derive(Serialize)]
struct VerseRecord<'a> {
    #[serde(flatten)]
    verse: &'a Verse,
    label: String,
}

impl<'a> VerseRecord<'a> {
    fn new(verse: &'a Verse) -> Self {
        Self {
            verse,
            label: verse.label(),
        }
    }
}

/// Write a single verse followed by its chapter label
pub fn write_verse<W: Write>(out: &mut W, verse: &Verse, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            writeln!(out, "{}", verse.text)?;
            writeln!(out, "{}", verse.label())?;
        }
        OutputFormat::Colour => {
            writeln!(out)?;
            writeln!(out, "{}", verse.text.as_str().bold().white())?;
            writeln!(out, "{}", verse.label().as_str().italic().blue())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &VerseRecord::new(verse))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Write one search hit. JSON hits are one compact object per line so
/// results can be streamed.
pub fn write_match<W: Write>(out: &mut W, verse: &Verse, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &VerseRecord::new(verse))?;
            writeln!(out)?;
        }
        _ => write_verse(out, verse, format)?,
    }
    out.flush()?;
    Ok(())
}
