//! Ordered matcher rules that pull a profile slug out of a parsed URL.

use url::Url;

/// One way of capturing a slug from a LinkedIn URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `<marker><segment>` anywhere in the path, e.g. `/in/jane-doe`.
    ///
    /// The segment is one or more characters up to the next `/` or `?`.
    PathSegment { marker: &'static str },
    /// First non-empty value of `key` when the path starts with `path_prefix`
    /// (legacy `/profile/view?id=...` links).
    QueryParam {
        path_prefix: &'static str,
        key: &'static str,
    },
}

/// Rules in evaluation order. The first rule that captures wins.
pub const RULES: &[Rule] = &[
    Rule::PathSegment { marker: "/in/" },
    Rule::PathSegment {
        marker: "/company/",
    },
    Rule::QueryParam {
        path_prefix: "/profile/view",
        key: "id",
    },
];

impl Rule {
    /// Returns the raw (still percent-encoded) capture, if this rule applies.
    pub fn capture(&self, url: &Url) -> Option<String> {
        match *self {
            Rule::PathSegment { marker } => {
                let segment = segment_after(url.path(), marker)?;
                let segment = segment.strip_suffix('/').unwrap_or(segment);
                Some(segment.to_string())
            }
            Rule::QueryParam { path_prefix, key } => {
                if !url.path().starts_with(path_prefix) {
                    return None;
                }
                url.query_pairs()
                    .find(|(k, v)| k == key && !v.is_empty())
                    .map(|(_, v)| v.into_owned())
            }
        }
    }
}

/// Finds the first occurrence of `marker` in `path` that is followed by a
/// non-empty segment and returns that segment.
pub(super) fn segment_after<'a>(path: &'a str, marker: &str) -> Option<&'a str> {
    path.match_indices(marker).find_map(|(start, _)| {
        let rest = &path[start + marker.len()..];
        let end = rest
            .find(|c: char| c == '/' || c == '?')
            .unwrap_or(rest.len());
        let segment = &rest[..end];
        (!segment.is_empty()).then_some(segment)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn segment_stops_at_slash() {
        assert_eq!(segment_after("/in/jane/details", "/in/"), Some("jane"));
        assert_eq!(segment_after("/in/jane", "/in/"), Some("jane"));
    }

    #[test]
    fn segment_anchored_anywhere() {
        assert_eq!(segment_after("/mwlite/in/jane", "/in/"), Some("jane"));
    }

    #[test]
    fn empty_segment_skips_to_next_marker() {
        assert_eq!(segment_after("/in//in/jane", "/in/"), Some("jane"));
        assert_eq!(segment_after("/in/", "/in/"), None);
    }

    #[test]
    fn no_marker() {
        assert_eq!(segment_after("/feed/", "/in/"), None);
        assert_eq!(segment_after("", "/in/"), None);
    }

    #[test]
    fn in_rule_precedes_company_rule() {
        let u = url("https://www.linkedin.com/company/acme/in/jane");
        let first = RULES.iter().find_map(|r| r.capture(&u));
        assert_eq!(first.as_deref(), Some("jane"));
    }

    #[test]
    fn query_rule_requires_path_prefix() {
        let rule = Rule::QueryParam {
            path_prefix: "/profile/view",
            key: "id",
        };
        assert_eq!(
            rule.capture(&url("https://www.linkedin.com/profile/view?id=42"))
                .as_deref(),
            Some("42")
        );
        assert_eq!(
            rule.capture(&url("https://www.linkedin.com/search?id=42")),
            None
        );
    }

    #[test]
    fn query_rule_skips_blank_values() {
        let rule = RULES[2];
        assert_eq!(
            rule.capture(&url("https://www.linkedin.com/profile/view?id=&id=7&id=8"))
                .as_deref(),
            Some("7")
        );
        assert_eq!(
            rule.capture(&url("https://www.linkedin.com/profile/view?id=")),
            None
        );
    }
}
