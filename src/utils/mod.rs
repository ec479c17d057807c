//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .map(|base| resolve_url(&base, href))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://www.ntvg.nl/artikelen/vrije-wil").unwrap();
        assert_eq!(
            resolve_url(&base, "/system/files/publications/a1968.pdf"),
            "https://www.ntvg.nl/system/files/publications/a1968.pdf"
        );
        assert_eq!(
            resolve_url(&base, "https://cdn.example.com/x.pdf"),
            "https://cdn.example.com/x.pdf"
        );
    }

    #[test]
    fn test_resolve_invalid_base() {
        assert_eq!(resolve("not a url", "x.pdf"), None);
        assert_eq!(
            resolve("https://www.ntvg.nl/artikelen/", "a.pdf"),
            Some("https://www.ntvg.nl/artikelen/a.pdf".to_string())
        );
    }
}
