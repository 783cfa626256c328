//! @dose
//! purpose: The translation pipeline. Tokenizes text, translates each distinct translatable
//!     token once, substitutes the results back in order, then fits the result to a
//!     character limit with the two passes in fit.
//!
//! when-editing:
//!     - !Identical tokens must share one translation; build the TranslationMap first
//!     - !The TranslationMap only stores entries whose translation differs from the source
//!     - Translator owns its resolver so a caller can plug in real network resolution
//!
//! invariants:
//!     - Whitespace between tokens is carried through byte for byte unless Pass A or Pass B
//!         removes it together with a neighbouring word
//!     - A successful translate never returns more than `limit` characters
//!
//! do-not:
//!     - Never truncate inside a token to meet the limit
//!
//! flows:
//!     - Normalize: insert a space before "http" glued to a preceding word
//!     - Translate: tokenize -> distinct translatable tokens -> TranslationMap -> substitute
//!     - Fit: deduplicate_tokens -> delete_tokens -> join

mod fit;
mod links;
mod syllables;
mod token;
mod tokenize;

pub use fit::{deduplicate_tokens, delete_tokens, FitError, DEFAULT_LIMIT};
pub use links::{LinkPolicy, LinkRewrite, PassthroughResolver, ResolveError, UrlResolver};
pub use syllables::syllables;
pub use token::{
    case_mimic, is_case_ambiguous, is_translatable, translate_token, TokenTranslator,
    DEFAULT_FILLER, MAX_SPLIT_DEPTH,
};
pub use tokenize::{is_whitespace, tokenize};

use crate::types::Vocabulary;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error(transparent)]
    Fit(#[from] FitError),
}

impl TranslateError {
    /// The longest text the pipeline could produce before giving up
    pub fn best_effort(&self) -> &str {
        match self {
            TranslateError::Fit(FitError::InsufficientSalvage { best_effort, .. }) => best_effort,
        }
    }
}

/// Source token → translation, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct TranslationMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TranslationMap {
    /// Record a translation; identity translations and repeated sources are ignored
    pub fn insert(&mut self, source: &str, translated: &str) -> bool {
        if source == translated || self.index.contains_key(source) {
            return false;
        }
        self.index.insert(source.to_string(), self.entries.len());
        self.entries
            .push((source.to_string(), translated.to_string()));
        true
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.index
            .get(source)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, translated)| translated.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, translated)| (source.as_str(), translated.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Insert a space before "http" when it is glued to the previous word
fn separate_links(text: &str) -> Cow<'_, str> {
    let mut separated = String::new();
    let mut copied = 0;
    for (idx, _) in text.match_indices("http") {
        let glued = text[..idx]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace());
        if glued {
            separated.push_str(&text[copied..idx]);
            separated.push(' ');
            copied = idx;
        }
    }
    if copied == 0 {
        return Cow::Borrowed(text);
    }
    separated.push_str(&text[copied..]);
    Cow::Owned(separated)
}

/// A configured translation pipeline
pub struct Translator {
    vocabulary: Vocabulary,
    resolver: Box<dyn UrlResolver>,
    links: LinkPolicy,
    filler: String,
    limit: usize,
}

impl Translator {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            resolver: Box::new(PassthroughResolver),
            links: LinkPolicy::default(),
            filler: DEFAULT_FILLER.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_resolver(mut self, resolver: impl UrlResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_links(mut self, links: LinkPolicy) -> Self {
        self.links = links;
        self
    }

    pub fn with_filler(mut self, filler: impl Into<String>) -> Self {
        self.filler = filler.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn token_translator(&self) -> TokenTranslator<'_> {
        TokenTranslator::new(&self.vocabulary, self.resolver.as_ref(), &self.links)
            .with_filler(&self.filler)
    }

    /// Translate each distinct translatable token once
    pub fn translation_map(&self, tokens: &[&str]) -> TranslationMap {
        let translator = self.token_translator();
        let mut seen = HashSet::new();
        let mut map = TranslationMap::default();
        for &token in tokens {
            if !seen.insert(token) || !is_translatable(token) {
                continue;
            }
            let translated = translator.translate(token);
            map.insert(token, &translated);
        }
        map
    }

    /// Translate text and fit it within the configured limit
    pub fn translate(&self, text: &str) -> Result<String, TranslateError> {
        log::info!("Translating: {}", text);
        let text = separate_links(text);

        let tokens = tokenize(&text);
        let translations = self.translation_map(&tokens);
        let translated: Vec<String> = tokens
            .iter()
            .map(|&token| translations.get(token).unwrap_or(token).to_string())
            .collect();

        let translated = deduplicate_tokens(translated, self.limit);
        let translated = delete_tokens(translated, self.limit, &translations)?;

        let translation = translated.concat();
        log::info!("Translation: {}", translation);
        Ok(translation)
    }
}

/// Translate text with a vocabulary, fitting the result within `limit` characters
pub fn translate(
    text: &str,
    vocabulary: &Vocabulary,
    limit: usize,
) -> Result<String, TranslateError> {
    Translator::new(vocabulary.clone())
        .with_limit(limit)
        .translate(text)
}
