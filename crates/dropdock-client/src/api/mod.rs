//! API endpoint modules.

mod domains;
mod groups;

pub use domains::DomainsApi;
pub use groups::GroupsApi;

/// Percent-encode a single path segment.
///
/// Regex patterns contain `\`, `|`, `^` and `$`, none of which may appear
/// raw in a path.
pub(crate) fn segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
