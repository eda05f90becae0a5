//! core/tags/util.rs
//! Small helpers shared by tag loading/writing.

use std::path::Path;

/// Extensions of the containers the codec can place an ID3 tag in. The
/// codec sniffs the actual container itself; this only keeps other formats
/// away from it.
const TAG_CONTAINERS: [&str; 4] = ["mp3", "wav", "aif", "aiff"];

pub(crate) fn is_tag_container(path: &Path) -> bool {
    extension(path).is_some_and(|ext| TAG_CONTAINERS.iter().any(|c| ext.eq_ignore_ascii_case(c)))
}

/// Extension without the dot ("mp3"), as written in the path.
pub(crate) fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

/// Parse strings like:
/// - "3" -> (Some(3), None)
/// - "3/12" -> (Some(3), Some(12))
pub(crate) fn parse_slash_pair_u32(s: Option<&str>) -> (Option<u32>, Option<u32>) {
    let Some(s) = s else { return (None, None) };
    let s = s.trim();
    if s.is_empty() {
        return (None, None);
    }

    let mut parts = s.split('/');
    let a = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let b = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    (a, b)
}
