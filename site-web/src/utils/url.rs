//! URL helpers for navigation links

/// Section id named by a link `href` such as `#events` or `/index.html#events`.
///
/// Returns `None` when the href carries no fragment or an empty one.
pub fn fragment_id(href: &str) -> Option<String> {
    let (_, fragment) = href.split_once('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(
        urlencoding::decode(fragment)
            .map(|id| id.into_owned())
            .unwrap_or_else(|_| fragment.to_string()),
    )
}
