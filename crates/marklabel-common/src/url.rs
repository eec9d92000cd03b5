//! Link target resolution.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Anchors in label markup usually carry absolute URLs, but a label can be
//! configured with a base URL so that `<a href="/users/42">` resolves to a
//! full address before it is handed to the link delegate.

/// [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
///
/// "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
/// followed by a scheme-relative or path-absolute URL string."
///
/// Simplified: a scheme is an ASCII letter followed by letters, digits,
/// `+`, `-` or `.`, terminated by `:`.
#[must_use]
pub fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve an anchor's `href` against an optional base URL.
///
/// - Absolute targets (`https:`, `mailto:`, `tel:`, custom app schemes) are
///   returned unchanged.
/// - `//host/path` takes the base's scheme.
/// - `/path` replaces the base's path.
/// - Anything else replaces the last path segment of the base.
/// - Fragment-only and query-only targets are appended to the base.
///
/// Without a base the trimmed `href` is returned as written.
#[must_use]
pub fn resolve_href(href: &str, base: Option<&str>) -> String {
    let href = href.trim();
    let base = match base {
        Some(base) if !has_scheme(href) && has_scheme(base) => base,
        _ => return href.to_string(),
    };
    let Some((scheme, rest)) = base.split_once(':') else {
        return href.to_string();
    };

    if let Some(authority_relative) = href.strip_prefix("//") {
        return format!("{scheme}://{authority_relative}");
    }
    if href.starts_with('#') || href.starts_with('?') {
        let cut = base.find(href.chars().next().unwrap_or('#')).unwrap_or(base.len());
        return format!("{}{href}", &base[..cut]);
    }

    // Split "//host/path" into origin and path.
    let after_slashes = rest.strip_prefix("//").unwrap_or(rest);
    let host_len = after_slashes.find('/').unwrap_or(after_slashes.len());
    let origin_len = base.len() - after_slashes.len() + host_len;
    let origin = &base[..origin_len];

    if href.starts_with('/') {
        return format!("{origin}{href}");
    }

    let path = &base[origin_len..];
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let directory = path.rfind('/').map_or("/", |slash| &path[..=slash]);
    format!("{origin}{directory}{href}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_href_is_unchanged() {
        assert_eq!(
            resolve_href("https://a.example/x", Some("https://b.example/")),
            "https://a.example/x"
        );
        assert_eq!(resolve_href("mailto:me@x.org", None), "mailto:me@x.org");
    }

    #[test]
    fn test_relative_paths() {
        let base = Some("https://dribbble.com/shots/123?list=popular");
        assert_eq!(resolve_href("/users/42", base), "https://dribbble.com/users/42");
        assert_eq!(resolve_href("comments", base), "https://dribbble.com/shots/comments");
        assert_eq!(resolve_href("//cdn.example/a.png", base), "https://cdn.example/a.png");
        assert_eq!(
            resolve_href("#top", base),
            "https://dribbble.com/shots/123?list=popular#top"
        );
    }

    #[test]
    fn test_base_without_path() {
        assert_eq!(resolve_href("about", Some("http://x.org")), "http://x.org/about");
    }

    #[test]
    fn test_no_base_keeps_href() {
        assert_eq!(resolve_href(" /users/42 ", None), "/users/42");
        assert!(!has_scheme("/users/42"));
        assert!(has_scheme("app+ext://open"));
    }
}
