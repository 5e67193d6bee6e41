//! DNS 名称规范化

/// Canonical form of a DNS name for comparison: trailing dots removed,
/// lower-cased, then exactly one trailing dot appended.
///
/// Lower-casing is Unicode-aware, so a raw U-label such as `BÜCHER.example`
/// folds to `bücher.example.`. Punycode names are plain ASCII and unaffected.
///
/// ```
/// use route53_shift_core::utils::normalize_dns_name;
///
/// assert_eq!(normalize_dns_name("Foo.Example.com"), "foo.example.com.");
/// assert_eq!(normalize_dns_name("foo.example.com."), "foo.example.com.");
/// ```
pub fn normalize_dns_name(name: &str) -> String {
    let mut normalized = name.trim_end_matches('.').to_lowercase();
    normalized.push('.');
    normalized
}

/// Compare two DNS names ignoring case and trailing dots.
pub fn dns_names_equal(a: &str, b: &str) -> bool {
    normalize_dns_name(a) == normalize_dns_name(b)
}
