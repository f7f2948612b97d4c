//! LinkedIn profile identifiers.
//!
//! Pulls the person username or company slug out of a LinkedIn URL and
//! builds the follow-up URLs and file names derived from it. Everything
//! here is pure: no I/O, no shared state.

mod decode;
mod rules;
mod stem;

pub use decode::{decode_segment, encode_segment};
pub use rules::{Rule, RULES};
pub use stem::file_stem;

use url::Url;

/// Host suffix a URL must carry to be considered a LinkedIn page.
pub const LINKEDIN_DOMAIN: &str = "linkedin.com";

/// Extracts the profile identifier from `url`.
///
/// Matching runs on the host and path as normalized by [`Url::parse`]: the
/// host is lowercased, `\` becomes `/` and `.`/`..` segments are resolved.
/// So `https://WWW.LINKEDIN.COM/in/jane` and `https://www.linkedin.com/in\jane`
/// both yield `jane`, and `/in/../company/acme` yields `acme`.
///
/// Returns `None` for anything that is not a recognised LinkedIn profile or
/// company URL, including strings that do not parse as URLs at all. Never
/// fails otherwise.
///
/// # Examples
///
/// - `extract("https://www.linkedin.com/in/vermaonline/")` → `Some("vermaonline")`
/// - `extract("https://www.linkedin.com/in/jane%20doe/")` → `Some("jane doe")`
/// - `extract("https://www.linkedin.com/profile/view?id=12345")` → `Some("12345")`
/// - `extract("https://www.example.com/in/someone")` → `None`
pub fn extract(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !is_linkedin_host(parsed.host_str()?) {
        return None;
    }
    let raw = RULES.iter().find_map(|rule| rule.capture(&parsed))?;
    Some(decode_segment(&raw))
}

/// Suffix check on the parsed (already lowercased) host.
///
/// This accepts regional subdomains (`de.linkedin.com`) but also any host
/// that merely ends in the domain, such as `evillinkedin.com`.
pub fn is_linkedin_host(host: &str) -> bool {
    host.ends_with(LINKEDIN_DOMAIN)
}

/// URL of the experience details page for a person identifier.
pub fn experience_url(identifier: &str) -> String {
    format!(
        "https://www.linkedin.com/in/{}/details/experience/",
        encode_segment(identifier)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_with_trailing_slash() {
        assert_eq!(
            extract("https://www.linkedin.com/in/vermaonline/").as_deref(),
            Some("vermaonline")
        );
    }

    #[test]
    fn regional_subdomain() {
        assert_eq!(
            extract("https://de.linkedin.com/in/max-mustermann").as_deref(),
            Some("max-mustermann")
        );
    }

    #[test]
    fn percent_decoded() {
        assert_eq!(
            extract("https://www.linkedin.com/in/jane%20doe/").as_deref(),
            Some("jane doe")
        );
    }

    #[test]
    fn company_with_query() {
        assert_eq!(
            extract("https://www.linkedin.com/company/acme-corp?lang=en").as_deref(),
            Some("acme-corp")
        );
    }

    #[test]
    fn person_query_does_not_leak() {
        assert_eq!(
            extract("https://www.linkedin.com/in/jane?trk=public_profile").as_deref(),
            Some("jane")
        );
    }

    #[test]
    fn details_page_yields_owner() {
        assert_eq!(
            extract("https://www.linkedin.com/in/jane/details/experience/").as_deref(),
            Some("jane")
        );
    }

    #[test]
    fn legacy_profile_view() {
        assert_eq!(
            extract("https://www.linkedin.com/profile/view?id=12345&x=1").as_deref(),
            Some("12345")
        );
    }

    #[test]
    fn legacy_profile_view_first_id_wins() {
        assert_eq!(
            extract("https://www.linkedin.com/profile/view?id=1&id=2").as_deref(),
            Some("1")
        );
    }

    #[test]
    fn wrong_domain() {
        assert_eq!(extract("https://www.example.com/in/someone"), None);
    }

    #[test]
    fn bare_domain() {
        assert_eq!(extract("https://www.linkedin.com/"), None);
        assert_eq!(extract("https://www.linkedin.com"), None);
        assert_eq!(extract("https://www.linkedin.com/feed/"), None);
        assert_eq!(extract("https://www.linkedin.com/profile/view"), None);
    }

    #[test]
    fn unparseable_input() {
        assert_eq!(extract("not a url at all"), None);
        assert_eq!(extract(""), None);
        assert_eq!(extract("www.linkedin.com/in/jane"), None);
        assert_eq!(extract("\u{0}\u{fffd}::::"), None);
        assert_eq!(extract("mailto:jane@linkedin.com"), None);
    }

    #[test]
    fn suffix_match_accepts_lookalike_host() {
        assert!(is_linkedin_host("linkedin.com"));
        assert!(is_linkedin_host("www.linkedin.com"));
        assert!(is_linkedin_host("evillinkedin.com"));
        assert!(!is_linkedin_host("linkedin.com.evil.net"));
        assert_eq!(
            extract("https://evillinkedin.com/in/jane").as_deref(),
            Some("jane")
        );
    }

    #[test]
    fn matches_normalized_url() {
        assert_eq!(
            extract("https://WWW.LINKEDIN.COM/in/jane").as_deref(),
            Some("jane")
        );
        assert_eq!(
            extract("https://www.linkedin.com/in\\jane").as_deref(),
            Some("jane")
        );
        assert_eq!(
            extract("https://www.linkedin.com/in/../company/acme").as_deref(),
            Some("acme")
        );
    }

    #[test]
    fn experience_url_encodes_identifier() {
        assert_eq!(
            experience_url("vermaonline"),
            "https://www.linkedin.com/in/vermaonline/details/experience/"
        );
        assert_eq!(
            experience_url("jane doe"),
            "https://www.linkedin.com/in/jane%20doe/details/experience/"
        );
    }

    #[test]
    fn experience_url_round_trips_through_extract() {
        let url = experience_url("jane doe");
        assert_eq!(extract(&url).as_deref(), Some("jane doe"));
    }
}
