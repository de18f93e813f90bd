use crate::foundation::error::{LayerExportError, LayerExportResult};
use crate::frames::spec::numbers_in;
use crate::layer::Layer;

/// Upper bound on the resolved maximum frame (each frame is one renderer run).
pub const MAX_FRAME_LIMIT: u32 = 10_000;

/// Largest number written anywhere in any layer's frame spec.
///
/// Digits are scanned in the raw spec text (bare tokens and range endpoints alike, before `end`
/// is substituted). Layers without a spec contribute nothing.
#[tracing::instrument(skip(layers), fields(layers = layers.len()))]
pub fn resolve_max_frame(layers: &[Layer]) -> LayerExportResult<u32> {
    let mut max: Option<u32> = None;
    for layer in layers {
        for digits in numbers_in(layer.spec_text()) {
            let n = digits
                .parse::<u32>()
                .map_err(|_| LayerExportError::invalid_token(layer.name(), digits))?;
            max = Some(max.map_or(n, |m| m.max(n)));
        }
    }

    let max = max.ok_or(LayerExportError::NoFrameSpecsFound)?;
    if max > MAX_FRAME_LIMIT {
        return Err(LayerExportError::validation(format!(
            "resolved max frame {max} exceeds the limit of {MAX_FRAME_LIMIT}"
        )));
    }
    tracing::debug!(max, "resolved max frame");
    Ok(max)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/resolve.rs"]
mod tests;
