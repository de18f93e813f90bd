use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::document::tree::Document;
use crate::export::naming::OutputNaming;
use crate::foundation::error::{LayerExportError, LayerExportResult, ToolFailure};
use crate::layer::LayerSet;
use crate::render::{Concatenator, FrameRenderer, OutputFormat, RenderRequest};

/// Cancellation flag checked between frames. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of rendering one frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameOutcome {
    pub frame: u32,
    pub path: PathBuf,
    /// Labels of the layers shown in this frame.
    pub visible_layers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolFailure>,
}

impl FrameOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of the concatenation step.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CombinedOutcome {
    pub path: PathBuf,
    pub inputs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolFailure>,
}

/// Summary of a finished export.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ExportReport {
    pub max_frame: u32,
    pub frames: Vec<FrameOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<CombinedOutcome>,
}

impl ExportReport {
    pub fn failed_frames(&self) -> impl Iterator<Item = &FrameOutcome> {
        self.frames.iter().filter(|f| !f.is_ok())
    }

    /// `true` when every frame and the concatenation (if any) succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed_frames().next().is_none()
            && self
                .combined
                .as_ref()
                .is_none_or(|c| c.error.is_none())
    }

    /// First recorded tool failure, frames before the concatenation.
    pub fn first_failure(&self) -> Option<&ToolFailure> {
        self.frames
            .iter()
            .filter_map(|f| f.error.as_ref())
            .chain(self.combined.iter().filter_map(|c| c.error.as_ref()))
            .next()
    }

    /// Turn the first recorded failure into [`LayerExportError::ExternalTool`].
    pub fn ensure_clean(&self) -> LayerExportResult<()> {
        match self.first_failure() {
            Some(failure) => Err(failure.clone().into()),
            None => Ok(()),
        }
    }
}

/// Drives the per-frame loop over one document.
///
/// The session is the only writer of the document while it runs: for each frame it applies the
/// layer visibility, takes a serialized snapshot, and hands that snapshot to the renderer before
/// touching the document again.
pub struct ExportSession<'a> {
    doc: &'a mut Document,
    layers: &'a LayerSet,
    naming: OutputNaming,
    format: OutputFormat,
    dpi: Option<u32>,
}

impl<'a> ExportSession<'a> {
    pub fn new(
        doc: &'a mut Document,
        layers: &'a LayerSet,
        naming: OutputNaming,
        format: OutputFormat,
        dpi: Option<u32>,
    ) -> Self {
        Self {
            doc,
            layers,
            naming,
            format,
            dpi,
        }
    }

    /// Render frames `1..=max_frame` in order, then concatenate the frames that succeeded.
    ///
    /// A failed render is logged and recorded in the report; the loop moves on. Style errors and
    /// cancellation abort the run.
    #[tracing::instrument(skip_all, fields(max_frame = self.layers.max_frame(), renderer = renderer.name()))]
    pub fn run(
        &mut self,
        renderer: &mut dyn FrameRenderer,
        concat: Option<&mut dyn Concatenator>,
        cancel: &CancelToken,
    ) -> LayerExportResult<ExportReport> {
        let max_frame = self.layers.max_frame();
        let mut frames = Vec::with_capacity(max_frame as usize);

        for frame in 1..=max_frame {
            if cancel.is_cancelled() {
                tracing::warn!(frame, "export cancelled");
                return Err(LayerExportError::Cancelled { frame });
            }
            frames.push(self.render_frame(renderer, frame)?);
        }

        let combined = concat.map(|c| self.concat(c, &frames));
        Ok(ExportReport {
            max_frame,
            frames,
            combined,
        })
    }

    fn render_frame(
        &mut self,
        renderer: &mut dyn FrameRenderer,
        frame: u32,
    ) -> LayerExportResult<FrameOutcome> {
        self.layers.apply_frame(self.doc, frame)?;
        let visible_layers: Vec<String> = self
            .layers
            .layers()
            .iter()
            .filter(|l| l.is_visible_in(frame))
            .map(|l| l.name().to_string())
            .collect();
        tracing::debug!(frame, visible = ?visible_layers, "frame applied");

        let svg = self.doc.to_xml_string();
        let path = self.naming.frame_path(frame);
        let req = RenderRequest {
            frame,
            svg: &svg,
            out_path: &path,
            format: self.format,
            dpi: self.dpi,
        };

        let error = match renderer.render(&req) {
            Ok(()) => {
                tracing::info!(frame, "{} written", path.display());
                None
            }
            Err(failure) => {
                tracing::warn!(frame, "render failed: {failure}");
                Some(failure)
            }
        };

        Ok(FrameOutcome {
            frame,
            path,
            visible_layers,
            error,
        })
    }

    fn concat(&self, concat: &mut dyn Concatenator, frames: &[FrameOutcome]) -> CombinedOutcome {
        let inputs: Vec<PathBuf> = frames
            .iter()
            .filter(|f| f.is_ok())
            .map(|f| f.path.clone())
            .collect();
        let path = self.naming.combined_path(concat.extension());

        if inputs.is_empty() {
            let failure = ToolFailure::new(
                concat.name(),
                format!("{} -> {}", concat.name(), path.display()),
                "not started",
                "no frame was rendered successfully",
            );
            tracing::warn!("concatenation skipped: {failure}");
            return CombinedOutcome {
                path,
                inputs: 0,
                error: Some(failure),
            };
        }

        let error = match concat.concat(&inputs, &path) {
            Ok(()) => {
                tracing::info!("{} written ({} frames)", path.display(), inputs.len());
                None
            }
            Err(failure) => {
                tracing::warn!("concatenation failed: {failure}");
                Some(failure)
            }
        };

        CombinedOutcome {
            path,
            inputs: inputs.len(),
            error,
        }
    }
}
