//! Expansion of a parsed target into the ordered download sequence.

use crate::parser::ParsedTarget;

/// One enumerated download: the request path and the local file it lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceItem {
    /// Path requested on the target host.
    pub remote_path: String,
    /// Final path segment of `remote_path`, used as the local filename.
    pub filename: String,
}

/// Lazily enumerates the full download sequence for a target.
///
/// Sub-ranges are expanded in token order, each ascending and zero-padded to
/// its recorded width, and rendered through the target's path template. The
/// iterator is finite and borrows the target for its lifetime.
pub fn enumerate(target: &ParsedTarget) -> impl Iterator<Item = SequenceItem> + '_ {
    target.ranges().iter().flat_map(move |range| {
        range.values().map(move |value| {
            let remote_path = target.template().render(&value);
            let filename = remote_path
                .rsplit('/')
                .next()
                .map(ToString::to_string)
                .unwrap_or_else(|| remote_path.clone());
            SequenceItem {
                remote_path,
                filename,
            }
        })
    })
}
