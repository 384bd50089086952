// src/utils/url.rs

//! URL manipulation utilities.

/// Extract the lowercase host from a URL.
///
/// # Examples
/// ```
/// use product_data::utils::url::get_domain;
///
/// assert_eq!(
///     get_domain("https://Example.com/path"),
///     Some("example.com".to_string())
/// );
/// ```
pub fn get_domain(url: &str) -> Option<String> {
    let parsed = ::url::Url::parse(url).ok()?;
    parsed.host_str().map(str::to_lowercase)
}

/// Drop a leading `www.` from a domain.
pub fn strip_www(domain: &str) -> &str {
    domain.strip_prefix("www.").unwrap_or(domain)
}

/// Whether the URL is an embedded `data:` URI rather than a remote resource.
pub fn is_inline_data(url: &str) -> bool {
    url.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}
