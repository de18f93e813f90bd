use crate::foundation::error::ToolFailure;
use crate::render::{FrameRenderer, OutputFormat, RenderRequest};

/// Writes the frame's SVG snapshot as the output file.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotRenderer;

impl FrameRenderer for SnapshotRenderer {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn render(&mut self, req: &RenderRequest<'_>) -> Result<(), ToolFailure> {
        let command = format!("write {}", req.out_path.display());
        if req.format != OutputFormat::Svg {
            return Err(ToolFailure::new(
                "snapshot",
                command,
                "not started",
                format!("snapshot output is svg, not {}", req.format.extension()),
            ));
        }
        std::fs::write(req.out_path, req.svg)
            .map_err(|e| ToolFailure::new("snapshot", command, "failed", e.to_string()))
    }
}
