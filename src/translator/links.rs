//! @dose
//! purpose: Link handling for the token translator. Following redirects is network I/O,
//!     so it sits behind the UrlResolver capability; what to do with the resolved URL is
//!     plain data in LinkPolicy.
//!
//! when-editing:
//!     - !Resolvers must not panic; report failure through ResolveError
//!     - Rewrites are checked in order and the first matching prefix wins
//!
//! gotchas:
//!     - PassthroughResolver never touches the network, so rewrites still apply to the
//!         literal URL when running offline

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to resolve {url}: {reason}")]
    Unreachable { url: String, reason: String },
    #[error("Too many redirects resolving {0}")]
    TooManyRedirects(String),
}

/// Capability for following a link to its final destination
pub trait UrlResolver: Send + Sync {
    /// Return the URL the given link finally redirects to
    fn resolve(&self, url: &str) -> Result<String, ResolveError>;
}

/// Resolver that treats every URL as already final
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughResolver;

impl UrlResolver for PassthroughResolver {
    fn resolve(&self, url: &str) -> Result<String, ResolveError> {
        Ok(url.to_string())
    }
}

/// Replace resolved URLs starting with `prefix` by `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkRewrite {
    pub prefix: String,
    pub replacement: String,
}

/// Rules applied to a link once it has been resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    #[serde(rename = "rewrite")]
    pub rewrites: Vec<LinkRewrite>,
}

impl LinkPolicy {
    pub fn new(rewrites: Vec<LinkRewrite>) -> Self {
        Self { rewrites }
    }

    /// Apply the first matching rewrite, or hand the URL back unchanged
    pub fn apply(&self, resolved: String) -> String {
        match self
            .rewrites
            .iter()
            .find(|rewrite| resolved.starts_with(&rewrite.prefix))
        {
            Some(rewrite) => {
                log::debug!("Link <{}> rewritten to <{}>", resolved, rewrite.replacement);
                rewrite.replacement.clone()
            }
            None => resolved,
        }
    }
}
