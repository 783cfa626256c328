//! @dose
//! purpose: This module defines the command-line interface for martian using the clap derive
//!     macros. It specifies the translate and syllables commands and their arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!     - The limit flag has no default here; the config file supplies it when absent
//!
//! invariants:
//!     - The Cli struct is the root parser that clap uses to parse command-line arguments
//!     - PathBuf is used for all file/directory path arguments
//!
//! do-not:
//!     - Never add positional arguments that could conflict with subcommands
//!
//! gotchas:
//!     - translate with no TEXT (or a single "-") reads stdin
//!     - -v can be repeated: -v for info, -vv for debug, -vvv for trace

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "martian")]
#[command(author, version, about = "Translate text into syllable-driven nonsense")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding martian.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose logging (repeat for more detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate text, fitting it within the character limit
    Translate(TranslateArgs),

    /// Print the estimated syllable count of each word
    Syllables(SyllablesArgs),
}

#[derive(Args, Default)]
pub struct TranslateArgs {
    /// Text to translate; words are joined with spaces (use "-" or nothing for stdin)
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Maximum characters in the translation (overrides the config file)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Config file to use instead of <root>/martian.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Translate each input line on its own
    #[arg(long)]
    pub lines: bool,

    /// Print one JSON object per translation
    #[arg(long)]
    pub json: bool,

    /// Fail instead of printing a best-effort translation that does not fit
    #[arg(long)]
    pub strict: bool,
}

impl TranslateArgs {
    /// True when the text should come from stdin
    pub fn reads_stdin(&self) -> bool {
        self.text.is_empty() || (self.text.len() == 1 && self.text[0] == "-")
    }
}

#[derive(Args)]
pub struct SyllablesArgs {
    /// Words to count
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}
