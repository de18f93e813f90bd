//! The drawing document: an owned XML tree plus the style rewriting applied to layer nodes.

/// Flat style-string parsing and `display` toggling.
pub mod style;
/// Arena-backed XML tree.
pub mod tree;
