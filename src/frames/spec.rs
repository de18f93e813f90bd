use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::frames::resolve::MAX_FRAME_LIMIT;

/// Opening delimiter of a frame spec inside a layer label.
pub const SPEC_OPEN: &str = "__[";
/// Closing delimiter; the label must end with it.
pub const SPEC_CLOSE: &str = "]";
/// Sentinel for the last frame of the document.
pub const END_SENTINEL: &str = "end";

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+--[0-9]+").expect("static regex"));

/// Sorted, deduplicated frame numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct FrameSet(BTreeSet<u32>);

impl FrameSet {
    pub fn contains(&self, frame: u32) -> bool {
        self.0.contains(&frame)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }
}

impl FromIterator<u32> for FrameSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A token that is neither an integer nor a `A--B` range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid frame token '{0}'")]
pub struct BadToken(pub String);

/// Text between `__[` and the trailing `]` of a label, or `""` when the label carries no spec.
pub fn extract_spec_text(label: &str) -> &str {
    if !label.ends_with(SPEC_CLOSE) {
        return "";
    }
    let Some(idx) = label.find(SPEC_OPEN) else {
        return "";
    };
    let start = idx + SPEC_OPEN.len();
    let end = label.len() - SPEC_CLOSE.len();
    label.get(start..end).unwrap_or("")
}

/// Expand spec text into concrete frames.
///
/// `end` is textually replaced by `max_frame` before anything else, so it behaves like any integer
/// afterwards, also outside ranges. Ranges are inclusive; a descending range yields no frames.
/// Whitespace around tokens and empty tokens are ignored. A range ending above
/// [`MAX_FRAME_LIMIT`] is rejected as a bad token.
pub fn expand(spec_text: &str, max_frame: u32) -> Result<FrameSet, BadToken> {
    let text = spec_text.replace(END_SENTINEL, &max_frame.to_string());

    let mut frames = BTreeSet::new();
    for m in RANGE_RE.find_iter(&text) {
        let Some((a, b)) = m.as_str().split_once("--") else {
            continue;
        };
        let a = parse_frame(a)?;
        let b = parse_frame(b)?;
        if b > MAX_FRAME_LIMIT {
            return Err(BadToken(m.as_str().to_string()));
        }
        frames.extend(a..=b);
    }

    let rest = RANGE_RE.replace_all(&text, "");
    for token in rest.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        frames.insert(parse_frame(token)?);
    }

    Ok(FrameSet(frames))
}

fn parse_frame(token: &str) -> Result<u32, BadToken> {
    token.parse::<u32>().map_err(|_| BadToken(token.to_string()))
}

/// Every ASCII digit run in `spec_text`, `end` contributes nothing.
pub(crate) fn numbers_in(spec_text: &str) -> impl Iterator<Item = &str> {
    static DIGITS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[0-9]+").expect("static regex"));
    DIGITS_RE.find_iter(spec_text).map(|m| m.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/frames/spec.rs"]
mod tests;
