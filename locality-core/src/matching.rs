// Scheme detection and prefix matching for paths and URLs

use serde::{Deserialize, Serialize};
use url::Url;

/// How a reference is recognised as a network reference (as opposed to a path)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeDetection {
    /// A leading `scheme:` token. Single-letter schemes are treated as
    /// drive letters.
    #[default]
    Strict,
    /// `http://`, `https://`, or a colon anywhere in the string
    Heuristic,
}

/// How site-boundary and same-document checks compare locators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Compare whole path segments, so `/site2` is not inside `/site`
    #[default]
    Segment,
    /// Plain string-prefix comparison
    Prefix,
}

impl SchemeDetection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(SchemeDetection::Strict),
            "heuristic" | "colon" => Some(SchemeDetection::Heuristic),
            _ => None,
        }
    }
}

impl MatchMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "segment" | "segments" => Some(MatchMode::Segment),
            "prefix" | "raw" => Some(MatchMode::Prefix),
            _ => None,
        }
    }
}

/// Colon heuristic: any string with a colon counts as having a scheme.
/// This also catches `C:\docs` and `a/b:c`.
pub fn looks_like_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://") || reference.contains(':')
}

/// Returns the RFC 3986 scheme of `reference`, if it has one
pub fn uri_scheme(reference: &str) -> Option<&str> {
    let end = reference.find(':')?;
    let scheme = &reference[..end];

    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }

    Some(scheme)
}

/// Strict check: `scheme:` before any `/`, `?` or `#`.
/// A protocol-relative `//host/x` has no scheme and is not matched.
pub fn has_uri_scheme(reference: &str) -> bool {
    // A one-letter scheme is a drive letter (`C:\site`, `d:/docs`)
    matches!(uri_scheme(reference), Some(scheme) if scheme.len() > 1)
}

/// `C:\x`, `c:/x`
pub(crate) fn is_drive_path(reference: &str) -> bool {
    let bytes = reference.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

/// Strip the query and fragment from a path-style locator
pub(crate) fn strip_suffix(locator: &str) -> &str {
    match locator.find(['?', '#']) {
        Some(idx) => &locator[..idx],
        None => locator,
    }
}

/// Split a path into its meaningful segments. Empty and `.` segments are
/// dropped; `..` is kept as-is since no resolution happens here.
pub fn path_segments(path: &str) -> Vec<&str> {
    strip_suffix(path)
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

fn segments_have_prefix(segments: &[&str], prefix: &[&str]) -> bool {
    prefix.len() <= segments.len() && segments[..prefix.len()] == *prefix
}

/// Is `path` at or under `prefix`?
pub fn path_has_prefix(path: &str, prefix: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Prefix => path.starts_with(prefix),
        MatchMode::Segment => {
            // A drive letter or a leading separator is part of the identity
            // of the path, so `/site` and `site` never match each other.
            let rooted = |p: &str| p.starts_with(['/', '\\']);
            if rooted(path) != rooted(prefix) {
                return false;
            }
            segments_have_prefix(&path_segments(path), &path_segments(prefix))
        }
    }
}

fn url_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// Same origin and a segment-wise path prefix. Query and fragment are ignored.
pub fn url_has_prefix(url: &Url, prefix: &Url) -> bool {
    url.scheme() == prefix.scheme()
        && url.host_str() == prefix.host_str()
        && url.port_or_known_default() == prefix.port_or_known_default()
        && segments_have_prefix(&url_segments(url), &url_segments(prefix))
}
