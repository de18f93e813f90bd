//! Frame specs embedded in layer labels: `name__[1, 3--5, 7--end]`.

/// Global maximum frame across all layers.
pub mod resolve;
/// Spec extraction and expansion.
pub mod spec;
