//! URL Feature Extraction
//!
//! Maps a raw URL string to the fixed 11-feature vector the classifier was
//! trained on. Extraction is total: any string input yields a complete
//! vector, malformed URLs included.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Keywords whose presence anywhere in the lowercased URL is a signal.
const SUSPICIOUS_WORDS: [&str; 9] = [
    "login", "secure", "verify", "account", "update", "free", "bonus", "bank", "spam",
];

/// Dotted-quad pattern, matched against the full URL text.
static IP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}\b").unwrap());

/// TLD label after the last dot of the host. Lowercase only: the model was
/// trained on raw hosts, so an uppercase TLD scores 0.
static TLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.([a-z]+)(/|$)").unwrap());

/// URL features for ML
///
/// Field order is the classifier's trained input shape; [`Self::FEATURE_NAMES`]
/// is the stable schema checked against loaded artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlFeatures {
    /// Character count of the raw URL
    pub url_length: f64,
    /// Count of `.` in the raw URL
    pub num_dots: f64,
    /// Count of `-` in the raw URL
    pub num_hyphens: f64,
    /// Count of decimal digits in the raw URL
    pub num_digits: f64,
    /// Count of `?`, `=`, `&`, `%` in the raw URL
    pub num_special_chars: f64,
    /// URL starts with `https` (case-insensitive)
    pub has_https: f64,
    /// Count of `/` in the path component
    pub num_subdirs: f64,
    /// Count of `=` in the query component
    pub num_params: f64,
    /// URL contains a dotted-quad IP address
    pub has_ip_address: f64,
    /// Length of the lowercase TLD label of the host
    pub tld_length: f64,
    /// URL contains a suspicious keyword
    pub contains_suspicious_words: f64,
}

impl UrlFeatures {
    /// Feature schema, in vector order. Downstream inference expects exactly
    /// these names in exactly this order.
    pub const FEATURE_NAMES: [&'static str; 11] = [
        "url_length",
        "num_dots",
        "num_hyphens",
        "num_digits",
        "num_special_chars",
        "has_https",
        "num_subdirs",
        "num_params",
        "has_ip_address",
        "tld_length",
        "contains_suspicious_words",
    ];

    /// Extract features from a URL
    pub fn from_url(url: &str) -> Self {
        let parts = split_url(url);
        let lower = url.to_lowercase();

        Self {
            url_length: url.chars().count() as f64,
            num_dots: url.matches('.').count() as f64,
            num_hyphens: url.matches('-').count() as f64,
            num_digits: url.chars().filter(|c| c.is_ascii_digit()).count() as f64,
            num_special_chars: url
                .chars()
                .filter(|c| matches!(c, '?' | '=' | '&' | '%'))
                .count() as f64,
            has_https: if lower.starts_with("https") { 1.0 } else { 0.0 },
            num_subdirs: parts.path.matches('/').count() as f64,
            num_params: parts.query.matches('=').count() as f64,
            has_ip_address: if IP_RE.is_match(url) { 1.0 } else { 0.0 },
            tld_length: TLD_RE
                .captures(parts.host)
                .map_or(0.0, |c| c[1].len() as f64),
            contains_suspicious_words: if SUSPICIOUS_WORDS.iter().any(|w| lower.contains(w)) {
                1.0
            } else {
                0.0
            },
        }
    }

    /// Convert to feature vector
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.url_length,
            self.num_dots,
            self.num_hyphens,
            self.num_digits,
            self.num_special_chars,
            self.has_https,
            self.num_subdirs,
            self.num_params,
            self.has_ip_address,
            self.tld_length,
            self.contains_suspicious_words,
        ]
    }
}

/// Verbatim host/path/query slices of a URL.
struct UrlParts<'a> {
    host: &'a str,
    path: &'a str,
    query: &'a str,
}

/// Split a URL into `scheme://host/path?query` components.
///
/// Never fails: with no recognizable scheme or authority the affected
/// components come back empty. Components are raw slices of the input; no
/// lowercasing, decoding, or path normalization happens here, since
/// `tld_length` depends on the host text exactly as submitted.
fn split_url(url: &str) -> UrlParts<'_> {
    let mut rest = url;

    if let Some(colon) = rest.find(':') {
        let scheme = &rest[..colon];
        let valid = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            rest = &rest[colon + 1..];
        }
    }

    let mut host = "";
    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        host = &after[..end];
        rest = &after[end..];
    }

    // Fragment belongs to neither path nor query.
    if let Some(hash) = rest.find('#') {
        rest = &rest[..hash];
    }

    let (path, query) = match rest.find('?') {
        Some(q) => (&rest[..q], &rest[q + 1..]),
        None => (rest, ""),
    };

    UrlParts { host, path, query }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_components() {
        let parts = split_url("http://example.com/a/b?x=1&y=2");
        assert_eq!(parts.host, "example.com");
        assert_eq!(parts.path, "/a/b");
        assert_eq!(parts.query, "x=1&y=2");
    }

    #[test]
    fn test_split_schemeless_goes_to_path() {
        let parts = split_url("example.com/about");
        assert_eq!(parts.host, "");
        assert_eq!(parts.path, "example.com/about");
        assert_eq!(parts.query, "");
    }

    #[test]
    fn test_split_keeps_raw_authority() {
        // Userinfo and port stay attached to the host slice.
        let parts = split_url("https://User@EXAMPLE.COM:8080/x");
        assert_eq!(parts.host, "User@EXAMPLE.COM:8080");
        assert_eq!(parts.path, "/x");
    }

    #[test]
    fn test_fragment_excluded() {
        let parts = split_url("http://x.com/a#b=1");
        assert_eq!(parts.path, "/a");
        assert_eq!(parts.query, "");

        let features = UrlFeatures::from_url("http://x.com/a#b=1");
        assert_eq!(features.num_params, 0.0);
    }

    #[test]
    fn test_counting_features() {
        let f = UrlFeatures::from_url("http://a-b.example.com/x?p=1&q=2%20");
        assert_eq!(f.url_length, 35.0);
        assert_eq!(f.num_dots, 2.0);
        assert_eq!(f.num_hyphens, 1.0);
        assert_eq!(f.num_digits, 4.0);
        // ? = & = % => 5
        assert_eq!(f.num_special_chars, 5.0);
        assert_eq!(f.num_subdirs, 1.0);
        assert_eq!(f.num_params, 2.0);
    }

    #[test]
    fn test_has_https_prefix_only() {
        assert_eq!(UrlFeatures::from_url("HTTPS://x.com").has_https, 1.0);
        assert_eq!(UrlFeatures::from_url("http://x.com").has_https, 0.0);
        assert_eq!(UrlFeatures::from_url("ftp://x.com").has_https, 0.0);
    }

    #[test]
    fn test_has_ip_address() {
        assert_eq!(
            UrlFeatures::from_url("http://192.168.1.1/login").has_ip_address,
            1.0
        );
        assert_eq!(
            UrlFeatures::from_url("http://example.com/login").has_ip_address,
            0.0
        );
    }

    #[test]
    fn test_suspicious_words() {
        assert_eq!(
            UrlFeatures::from_url("http://freebonus-bank.com").contains_suspicious_words,
            1.0
        );
        assert_eq!(
            UrlFeatures::from_url("http://example.com/about").contains_suspicious_words,
            0.0
        );
        // Case-insensitive match.
        assert_eq!(
            UrlFeatures::from_url("http://x.com/LOGIN").contains_suspicious_words,
            1.0
        );
    }

    #[test]
    fn test_tld_length() {
        assert_eq!(UrlFeatures::from_url("http://example.com").tld_length, 3.0);
        assert_eq!(UrlFeatures::from_url("http://localhost").tld_length, 0.0);
        // Lowercase-only by design: raw uppercase hosts score 0.
        assert_eq!(UrlFeatures::from_url("http://EXAMPLE.COM").tld_length, 0.0);
        // A port suffix defeats the end-anchored match.
        assert_eq!(
            UrlFeatures::from_url("http://example.com:8080/x").tld_length,
            0.0
        );
    }

    #[test]
    fn test_total_over_arbitrary_text() {
        for input in ["", "::::", "not a url", "example.com/about", "https://пример.рф/страница?a=1"] {
            let f = UrlFeatures::from_url(input);
            assert_eq!(f.to_vector().len(), UrlFeatures::FEATURE_NAMES.len());
        }

        let empty = UrlFeatures::from_url("");
        assert_eq!(empty.url_length, 0.0);
        assert_eq!(empty.tld_length, 0.0);
    }

    #[test]
    fn test_unicode_counts_chars_not_bytes() {
        let f = UrlFeatures::from_url("https://пример.рф/п");
        assert_eq!(f.url_length, 19.0);
    }

    #[test]
    fn test_idempotent() {
        let url = "http://secure-login.example.com/verify?acc=1";
        assert_eq!(UrlFeatures::from_url(url), UrlFeatures::from_url(url));
    }

    #[test]
    fn test_phishing_like_url() {
        let f = UrlFeatures::from_url("http://secure-login.example.com/verify?acc=1");
        assert_eq!(f.contains_suspicious_words, 1.0);
        assert_eq!(f.has_https, 0.0);
        assert_eq!(f.num_params, 1.0);
        assert_eq!(f.num_subdirs, 1.0);
        assert_eq!(f.tld_length, 3.0);
    }

    #[test]
    fn test_vector_order_matches_schema() {
        let f = UrlFeatures::from_url("https://example.com/a?b=c");
        let v = f.to_vector();
        assert_eq!(v[5], f.has_https);
        assert_eq!(v[9], f.tld_length);
        assert_eq!(v[10], f.contains_suspicious_words);
    }
}
