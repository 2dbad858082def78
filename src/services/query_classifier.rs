//! Classification of free-form command bar text into a [`QueryIntent`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::query::{QueryIntent, FIND_PREFIX, SEARCH_PREFIX};

/// A bare host: a run without whitespace or slashes that either contains a
/// dot followed by a label that does not start with a digit, or ends its
/// host part with `:<port>`. Only the start of the text has to match.
static BARE_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^/\s]+((\.[^/\s]+)*\.[^/0-9\s]+|:[0-9]+)").expect("valid bare host pattern")
});

/// An alphanumeric scheme, a colon, and at least one more character.
static WITH_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+:.+").expect("valid scheme pattern"));

/// Decides what the user meant by `text`.
///
/// Rules are tried in order and the first match wins: `search:` prefix,
/// `find:` prefix, bare host, address with scheme, and finally a plain web
/// search. Total over all inputs; the empty string is a plain search.
pub fn classify(text: &str) -> QueryIntent {
    if text.starts_with(SEARCH_PREFIX) {
        QueryIntent::Search { with_scheme: true }
    } else if text.starts_with(FIND_PREFIX) {
        QueryIntent::InPageSearch
    } else if BARE_HOST.is_match(text) {
        QueryIntent::NavigateUrl { with_scheme: false }
    } else if WITH_SCHEME.is_match(text) {
        QueryIntent::NavigateUrl { with_scheme: true }
    } else {
        QueryIntent::Search { with_scheme: false }
    }
}

/// Classifies `text` and returns the intent with the text it applies to.
pub fn parse(text: &str) -> (QueryIntent, &str) {
    let intent = classify(text);
    (intent, intent.term(text))
}
