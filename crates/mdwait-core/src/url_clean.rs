//! URL cleaning for bare host names.
//!
//! Callers often pass `www.example.com` or `169.254.169.254/latest` without a
//! scheme. Such input has no authority, so the whole string is taken as the
//! host (plus any path) and the scheme defaults to `http`.

/// Scheme used when the input does not carry one.
const DEFAULT_SCHEME: &str = "http";

/// Returns `raw` with a scheme and authority.
///
/// Scheme-qualified input (`https://host/p`, `file:///x`) is returned as-is.
/// Scheme-relative input (`//host/p`) and bare hosts get `http://` prepended.
///
/// # Examples
///
/// - `clean_url("www.example.com")` → `"http://www.example.com"`
/// - `clean_url("//10.0.0.1/meta")` → `"http://10.0.0.1/meta"`
/// - `clean_url("https://example.com/a")` → `"https://example.com/a"`
pub fn clean_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || has_scheme_and_authority(raw) {
        return raw.to_string();
    }
    let host_and_rest = raw.strip_prefix("//").unwrap_or(raw);
    format!("{}://{}", DEFAULT_SCHEME, host_and_rest)
}

fn has_scheme_and_authority(s: &str) -> bool {
    let Some(idx) = s.find("://") else {
        return false;
    };
    let scheme = &s[..idx];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_http() {
        assert_eq!(clean_url("www.example.com"), "http://www.example.com");
    }

    #[test]
    fn bare_host_with_path_and_query() {
        assert_eq!(
            clean_url("169.254.169.254/latest/meta-data?x=1"),
            "http://169.254.169.254/latest/meta-data?x=1"
        );
    }

    #[test]
    fn scheme_relative() {
        assert_eq!(clean_url("//10.0.0.1/meta"), "http://10.0.0.1/meta");
    }

    #[test]
    fn qualified_urls_untouched() {
        assert_eq!(clean_url("https://example.com/a"), "https://example.com/a");
        assert_eq!(clean_url("http://10.0.0.1/meta"), "http://10.0.0.1/meta");
        assert_eq!(clean_url("file:///etc/hosts"), "file:///etc/hosts");
    }

    #[test]
    fn path_containing_scheme_like_text_is_not_a_scheme() {
        assert_eq!(
            clean_url("host/redirect?to=http://x"),
            "http://host/redirect?to=http://x"
        );
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean_url("   "), "");
    }
}
