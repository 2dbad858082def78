use serde::{Deserialize, Serialize};

/// Prefix that forces typed text to be treated as a web search.
pub const SEARCH_PREFIX: &str = "search:";

/// Prefix that turns typed text into an in-page find query.
pub const FIND_PREFIX: &str = "find:";

/// The classified purpose of text typed into the command bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryIntent {
    /// Navigate to an address. `with_scheme` is false for bare hosts such as
    /// `example.com` or `localhost:8080`.
    NavigateUrl { with_scheme: bool },
    /// Run a web search. `with_scheme` is true when the text carried the
    /// `search:` prefix.
    Search { with_scheme: bool },
    /// Search the text of the current page (`find:` prefix).
    InPageSearch,
}

impl QueryIntent {
    /// Returns the part of `text` that the intent operates on.
    ///
    /// Strips the `search:` or `find:` prefix when the intent carries one and
    /// returns `text` untouched otherwise.
    pub fn term<'a>(&self, text: &'a str) -> &'a str {
        match self {
            QueryIntent::Search { with_scheme: true } => {
                text.strip_prefix(SEARCH_PREFIX).unwrap_or(text)
            }
            QueryIntent::InPageSearch => text.strip_prefix(FIND_PREFIX).unwrap_or(text),
            _ => text,
        }
    }
}

/// Direction of an in-page text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindDirection {
    #[default]
    Forward,
    Backward,
}
