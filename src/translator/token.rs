//! @dose
//! purpose: Per-token translation. Decides whether a token is worth translating and, if so,
//!     which strategy rewrites it: passthrough, link resolution, vocabulary substitution,
//!     splitting into sub-tokens, or syllable-driven generation.
//!
//! when-editing:
//!     - !Strategy order is fixed: passthrough, link, vocabulary, split, generation
//!     - !Vocabulary hits and generated words go through case_mimic; links and splits do not
//!     - Split recursion is capped at MAX_SPLIT_DEPTH, after which generation takes over
//!
//! invariants:
//!     - Tokens without cased letters are returned unchanged
//!     - The same token with the same vocabulary always yields the same translation
//!
//! gotchas:
//!     - Sub-tokens are runs of two or more ASCII letters or any single other character, so a
//!         lone letter inside a word ("I'm" -> "I", "'", "m") is generated on its own
//!     - Pluralization only copies a trailing lowercase s, z or y; "-ed" is not handled
//!     - A failed link resolution is logged and the link falls through to the later strategies

use super::links::{LinkPolicy, PassthroughResolver, UrlResolver};
use super::syllables::syllables;
use super::tokenize::is_whitespace;
use crate::types::Vocabulary;
use once_cell::sync::Lazy;
use regex::Regex;

/// Filler unit repeated once per syllable when generating a word
pub const DEFAULT_FILLER: &str = "ack";

/// Deepest sub-token split before falling back to generation
pub const MAX_SPLIT_DEPTH: usize = 10;

static SUBTOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{2,}|.").unwrap());

/// Trailing characters copied onto a generated word
const PLURAL_ENDINGS: [char; 3] = ['s', 'z', 'y'];

/// True when upper- and lowercasing leave the token unchanged (no cased letters)
pub fn is_case_ambiguous(token: &str) -> bool {
    token.to_uppercase() == token.to_lowercase()
}

/// Decide whether a token from the input should be translated at all
pub fn is_translatable(token: &str) -> bool {
    if is_whitespace(token) && token != " " {
        log::debug!("Token <{}> is atypical whitespace", token.escape_debug());
        return false;
    }
    if is_case_ambiguous(token) {
        log::debug!("Token <{}> has ambiguous case", token);
        return false;
    }
    if token.starts_with('@') || token.starts_with(".@") {
        log::debug!("Token <{}> is a mention", token);
        return false;
    }
    if token.starts_with('#') {
        log::debug!("Token <{}> is a hashtag", token);
        return false;
    }
    if token.starts_with("http") {
        log::debug!("Token <{}> is a link", token);
        return true;
    }
    if token.ends_with('.') && token.chars().count() == 2 {
        log::debug!("Token <{}> is an initial", token);
        return false;
    }
    true
}

/// Give `candidate` the capitalization pattern of `example`
pub fn case_mimic(candidate: &str, example: &str) -> String {
    if example.chars().count() > 1 && example.to_uppercase() == example {
        return candidate.to_uppercase();
    }
    match example.chars().next() {
        Some(first) if first.to_uppercase().eq(std::iter::once(first)) => {
            capitalize_first(candidate)
        }
        _ => candidate.to_lowercase(),
    }
}

/// Uppercase the first character, leaving the rest untouched
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Translate a single token with no link resolution and the default filler
pub fn translate_token(token: &str, vocabulary: &Vocabulary) -> String {
    let links = LinkPolicy::default();
    TokenTranslator::new(vocabulary, &PassthroughResolver, &links).translate(token)
}

/// Borrowed view of everything needed to translate one token
#[derive(Clone, Copy)]
pub struct TokenTranslator<'a> {
    vocabulary: &'a Vocabulary,
    resolver: &'a dyn UrlResolver,
    links: &'a LinkPolicy,
    filler: &'a str,
}

impl<'a> TokenTranslator<'a> {
    pub fn new(
        vocabulary: &'a Vocabulary,
        resolver: &'a dyn UrlResolver,
        links: &'a LinkPolicy,
    ) -> Self {
        Self {
            vocabulary,
            resolver,
            links,
            filler: DEFAULT_FILLER,
        }
    }

    pub fn with_filler(mut self, filler: &'a str) -> Self {
        self.filler = filler;
        self
    }

    pub fn translate(&self, token: &str) -> String {
        let translated = self.translate_at(token, 0);
        log::debug!("Token <{}> translated to <{}>", token, translated);
        translated
    }

    fn translate_at(&self, token: &str, depth: usize) -> String {
        if is_case_ambiguous(token) {
            return token.to_string();
        }

        if token.starts_with("https://") {
            if let Some(link) = self.translate_link(token) {
                return link;
            }
        }

        if let Some(replacement) = self.vocabulary.get(token) {
            log::debug!("Translating <{}> from vocabulary", token);
            return case_mimic(replacement, token);
        }

        if depth < MAX_SPLIT_DEPTH {
            let parts: Vec<&str> = SUBTOKEN_PATTERN
                .find_iter(token)
                .map(|m| m.as_str())
                .collect();
            if parts.len() > 1 {
                log::debug!("Translating <{}> by splitting", token);
                return parts
                    .into_iter()
                    .map(|part| self.translate_at(part, depth + 1))
                    .collect();
            }
        } else {
            log::warn!("Token <{}> exceeded split depth {}", token, MAX_SPLIT_DEPTH);
        }

        log::debug!("Translating <{}> by generation", token);
        self.generate(token)
    }

    fn translate_link(&self, url: &str) -> Option<String> {
        log::debug!("Checking <{}> for redirects", url);
        match self.resolver.resolve(url) {
            Ok(resolved) => {
                log::debug!("URL resolved as <{}>", resolved);
                Some(self.links.apply(resolved))
            }
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    /// Repeat the filler once per syllable and copy a plural-looking ending
    fn generate(&self, token: &str) -> String {
        let mut generated = self.filler.repeat(syllables(token));
        if let Some(last) = token.chars().last().filter(|c| PLURAL_ENDINGS.contains(c)) {
            generated.push(last);
        }
        case_mimic(&generated, token)
    }
}
