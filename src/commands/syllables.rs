//! Syllables command: prints the estimate the translator uses for each word.

use crate::cli::SyllablesArgs;
use crate::translator::{is_whitespace, syllables, tokenize};
use anyhow::{Context, Result};
use std::io::{self, Write};

pub fn run_syllables(args: &SyllablesArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_syllables(&args.words, &mut stdout)
}

fn write_syllables(words: &[String], out: &mut impl Write) -> Result<()> {
    // Quoted arguments may hold several words
    for word in words.iter().flat_map(|w| tokenize(w)) {
        if is_whitespace(word) {
            continue;
        }
        writeln!(out, "{}\t{}", word, syllables(word)).context("Failed to write to stdout")?;
    }
    Ok(())
}
