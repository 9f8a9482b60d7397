use url::Url;

/// Resolve an href/src against `base`.
///
/// Relative references, dot segments and protocol-relative forms are resolved
/// the way a browser would. Anything that does not end up `http`/`https`
/// (`data:`, `mailto:`, `javascript:`) resolves to nothing.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let url = base.join(href).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// True when `url`'s host is `domain` or one of its subdomains.
pub fn is_trusted(url: &Url, domain: &str) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    let domain = domain.trim_start_matches("www.").to_ascii_lowercase();
    host == domain
        || host
            .strip_suffix(&domain)
            .is_some_and(|sub| sub.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "pathologyoutlines.com";

    fn base() -> Url {
        Url::parse("https://www.pathologyoutlines.com").unwrap()
    }

    fn resolved(href: &str) -> Option<String> {
        resolve(&base(), href).map(String::from)
    }

    fn trusted(href: &str) -> bool {
        resolve(&base(), href).is_some_and(|u| is_trusted(&u, DOMAIN))
    }

    #[test]
    fn resolve_variants() {
        assert_eq!(
            resolved("https://www.pathologyoutlines.com/a.jpg").as_deref(),
            Some("https://www.pathologyoutlines.com/a.jpg")
        );
        assert_eq!(
            resolved("//www.pathologyoutlines.com/a.jpg").as_deref(),
            Some("https://www.pathologyoutlines.com/a.jpg")
        );
        assert_eq!(
            resolved("/imgau/a.jpg").as_deref(),
            Some("https://www.pathologyoutlines.com/imgau/a.jpg")
        );
        assert_eq!(
            resolved("imgau/a.jpg").as_deref(),
            Some("https://www.pathologyoutlines.com/imgau/a.jpg")
        );
        assert_eq!(resolved("data:image/png;base64,AAAA"), None);
        assert_eq!(resolved("mailto:editor@pathologyoutlines.com"), None);
        assert_eq!(resolved("javascript:void(0)"), None);
        assert_eq!(resolved("   "), None);
    }

    #[test]
    fn dot_segments_are_normalized() {
        assert_eq!(
            resolved("../imgau/a.jpg").as_deref(),
            Some("https://www.pathologyoutlines.com/imgau/a.jpg")
        );
        assert_eq!(
            resolved("./imgau/./b.jpg").as_deref(),
            Some("https://www.pathologyoutlines.com/imgau/b.jpg")
        );
        assert_eq!(
            resolved("/topic/../imgau/c.jpg").as_deref(),
            Some("https://www.pathologyoutlines.com/imgau/c.jpg")
        );
    }

    #[test]
    fn uppercase_scheme_and_host() {
        let url = resolve(&base(), "HTTPS://WWW.PathologyOutlines.COM/imgau/A.jpg").unwrap();
        assert_eq!(url.as_str(), "https://www.pathologyoutlines.com/imgau/A.jpg");
        assert!(is_trusted(&url, DOMAIN));
    }

    #[test]
    fn trust_is_host_based() {
        assert!(trusted("https://www.pathologyoutlines.com/a.jpg"));
        assert!(trusted("https://images.pathologyoutlines.com/a.jpg"));
        assert!(trusted("http://pathologyoutlines.com:8080/a.jpg"));
        assert!(!trusted("https://evil.com/pathologyoutlines.com/a.jpg"));
        assert!(!trusted("https://notpathologyoutlines.com/a.jpg"));
        assert!(!trusted("https://pathologyoutlines.com.evil.com/a.jpg"));
    }

    #[test]
    fn backslash_in_host_is_a_path_separator() {
        let url = resolve(&base(), "https://evil.com\\.pathologyoutlines.com/a.jpg").unwrap();
        assert_eq!(url.host_str(), Some("evil.com"));
        assert!(!is_trusted(&url, DOMAIN));
    }

    #[test]
    fn userinfo_does_not_count_as_host() {
        assert!(!trusted("https://www.pathologyoutlines.com@evil.com/a.jpg"));
        assert!(!trusted("https://pathologyoutlines.com:x@evil.com/a.jpg"));
        assert!(trusted("https://user@www.pathologyoutlines.com/a.jpg"));
    }
}
