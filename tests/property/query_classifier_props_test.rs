//! Property-based tests for query classification.
//!
//! Classification is total, the explicit prefixes always win, and the term
//! handed to the action is the text with the prefix removed.

use keyweb::services::query_classifier::{classify, parse};
use keyweb::types::query::QueryIntent;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn classify_is_total_and_term_is_a_suffix(text in "\\PC{0,40}") {
        let (_, term) = parse(&text);
        prop_assert!(text.ends_with(term));
    }

    #[test]
    fn search_prefix_always_searches(rest in "\\PC{0,30}") {
        let text = format!("search:{}", rest);
        prop_assert_eq!(parse(&text), (QueryIntent::Search { with_scheme: true }, rest.as_str()));
    }

    #[test]
    fn find_prefix_always_searches_page(rest in "\\PC{0,30}") {
        let text = format!("find:{}", rest);
        prop_assert_eq!(parse(&text), (QueryIntent::InPageSearch, rest.as_str()));
    }

    #[test]
    fn dotted_hosts_navigate(
        host in "[a-z][a-z0-9-]{0,12}",
        tld in prop_oneof![Just("com"), Just("org"), Just("io"), Just("dev")],
        path in proptest::option::of("/[a-z0-9/]{0,10}"),
    ) {
        let text = format!("{}.{}{}", host, tld, path.unwrap_or_default());
        prop_assert_eq!(classify(&text), QueryIntent::NavigateUrl { with_scheme: false });
    }

    #[test]
    fn host_with_port_navigates(host in "[a-z]{1,12}", port in 1u16..) {
        prop_assume!(host != "search" && host != "find");
        let text = format!("{}:{}", host, port);
        prop_assert_eq!(classify(&text), QueryIntent::NavigateUrl { with_scheme: false });
    }

    #[test]
    fn scheme_addresses_navigate(scheme in "[a-z]{1,8}", rest in "//[a-z]{1,12}") {
        prop_assume!(scheme != "search" && scheme != "find");
        let text = format!("{}:{}", scheme, rest);
        prop_assert_eq!(classify(&text), QueryIntent::NavigateUrl { with_scheme: true });
    }

    #[test]
    fn plain_words_search(text in "[a-zA-Z0-9 ]{0,40}") {
        prop_assert_eq!(classify(&text), QueryIntent::Search { with_scheme: false });
    }
}
