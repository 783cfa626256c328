//! @dose
//! purpose: Configuration file parsing for martian.toml. Holds the vocabulary, the output
//!     character limit, the generation filler and the link rewrite rules.
//!
//! when-editing:
//!     - !Config is loaded once at startup and turned into a Translator
//!     - !Vocabulary keys are lowercased while deserializing
//!     - CLI flags override config values, never the other way around
//!
//! invariants:
//!     - Config::load returns default config if martian.toml doesn't exist
//!     - Config::load_from fails loudly; an explicitly named file must be usable
//!
//! gotchas:
//!     - Link rewrites are matched in file order (first matching prefix wins)
//!     - A limit of 0 is accepted but will make every non-empty translation fail to fit

use crate::translator::{LinkPolicy, Translator, DEFAULT_FILLER, DEFAULT_LIMIT};
use crate::types::Vocabulary;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the root directory
pub const CONFIG_FILE: &str = "martian.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Main configuration structure matching martian.toml
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum characters in a translation
    pub limit: usize,

    /// Unit repeated once per syllable for generated words
    pub filler: String,

    /// Word replacements consulted before generation
    pub vocab: Vocabulary,

    /// What to do with links after resolving them
    pub links: LinkPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            filler: DEFAULT_FILLER.to_string(),
            vocab: Vocabulary::new(),
            links: LinkPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from martian.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Reading config: {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a Translator from this config
    pub fn translator(&self) -> Translator {
        Translator::new(self.vocab.clone())
            .with_limit(self.limit)
            .with_filler(self.filler.clone())
            .with_links(self.links.clone())
    }
}
