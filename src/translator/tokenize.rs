//! @dose
//! purpose: Splits text into alternating runs of non-whitespace and whitespace so a
//!     translated text can be rebuilt with its original spacing.
//!
//! invariants:
//!     - Concatenating the tokens always reproduces the input exactly
//!     - Adjacent tokens never share a class (word followed by word is impossible)

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+|\s+").unwrap());

/// Tokenize text into maximal word and whitespace runs, left to right
pub fn tokenize(text: &str) -> Vec<&str> {
    let tokens: Vec<&str> = TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
    log::debug!("Tokenized: <{}>", tokens.join(">, <"));
    tokens
}

/// True when the token consists only of whitespace (and is not empty)
pub fn is_whitespace(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_whitespace)
}
