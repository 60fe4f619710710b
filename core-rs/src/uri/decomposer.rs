//! Namespace / local-name derivation for RDF URIs
//!
//! These functions are total over any string. Inputs that are not URIs at all
//! still produce a namespace (`/` when there is neither `#` nor `/`) because
//! domain classification matches on the exact strings produced here.

/// Namespace of a URI.
///
/// With a `#`, everything before the first `#` plus the `#` itself.
/// Without one, every `/` segment except the last, re-joined, plus a trailing `/`.
///
/// # Example
///
/// ```
/// use odissei_schema::uri::namespace_of;
///
/// assert_eq!(namespace_of("http://x/#a"), "http://x/#");
/// assert_eq!(namespace_of("http://x/y/a"), "http://x/y/");
/// assert_eq!(namespace_of("plain"), "/");
/// ```
pub fn namespace_of(uri: &str) -> String {
    match uri.split_once('#') {
        Some((head, _)) => format!("{}#", head),
        None => match uri.rsplit_once('/') {
            Some((head, _)) => format!("{}/", head),
            None => "/".to_string(),
        },
    }
}

/// Local name of a URI: the text after the last `#`, or after the last `/`.
///
/// # Example
///
/// ```
/// use odissei_schema::uri::local_name_of;
///
/// assert_eq!(local_name_of("http://x/#a"), "a");
/// assert_eq!(local_name_of("http://x/y/a"), "a");
/// assert_eq!(local_name_of("plain"), "plain");
/// ```
pub fn local_name_of(uri: &str) -> String {
    let separator = if uri.contains('#') { '#' } else { '/' };
    match uri.rsplit_once(separator) {
        Some((_, tail)) => tail.to_string(),
        None => uri.to_string(),
    }
}

/// Both halves at once.
pub fn split_uri(uri: &str) -> (String, String) {
    (namespace_of(uri), local_name_of(uri))
}

/// Human-readable label for a namespace.
///
/// Takes the last `/` segment with any `#` removed. When that comes out
/// empty (namespaces ending in `/`), falls back to the segment before it.
///
/// # Example
///
/// ```
/// use odissei_schema::uri::namespace_short_name;
///
/// assert_eq!(namespace_short_name("https://portal.odissei.nl/schema/geospatial#"), "geospatial");
/// assert_eq!(namespace_short_name("https://dataverse.org/schema/citation/"), "citation");
/// ```
pub fn namespace_short_name(namespace: &str) -> String {
    let segments: Vec<&str> = namespace.split('/').collect();
    let last = segments.last().map(|s| s.replace('#', "")).unwrap_or_default();
    if !last.is_empty() {
        return last;
    }

    if segments.len() >= 2 {
        segments[segments.len() - 2].to_string()
    } else {
        String::new()
    }
}
