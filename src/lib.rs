//! @dose
//! purpose: This is the library crate root for martian, exposing the translation pipeline for
//!     use as both a CLI tool and a library. It re-exports the types and functions most
//!     callers need.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - Keep the re-export list organized by module
//!
//! invariants:
//!     - The library never initializes a logger; only the binary does
//!     - Link resolution is always injected through UrlResolver
//!
//! gotchas:
//!     - translate() uses the PassthroughResolver; build a Translator to resolve links

pub mod cli;
pub mod commands;
pub mod config;
pub mod translator;
pub mod types;

// Re-export main types for convenience
pub use cli::{Cli, Commands, SyllablesArgs, TranslateArgs};
pub use config::{Config, ConfigError};
pub use translator::{
    case_mimic, syllables, tokenize, translate, translate_token, FitError, LinkPolicy,
    LinkRewrite, PassthroughResolver, ResolveError, TranslateError, TranslationMap, Translator,
    UrlResolver, DEFAULT_LIMIT,
};
pub use types::Vocabulary;
