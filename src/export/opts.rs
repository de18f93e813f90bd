use std::path::PathBuf;

use crate::foundation::error::{LayerExportError, LayerExportResult};
use crate::render::concat::{FfmpegConcatenator, PdftkConcatenator};
use crate::render::inkscape::{InkscapeCli, InkscapeRenderer};
use crate::render::raster::ResvgRenderer;
use crate::render::snapshot::SnapshotRenderer;
use crate::render::{Concatenator, FrameRenderer, OutputFormat, RendererKind};

/// Programs used for rendering and concatenation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub inkscape: PathBuf,
    pub pdftk: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            inkscape: PathBuf::from("inkscape"),
            pdftk: PathBuf::from("pdftk"),
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

/// Options for one export run.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    pub format: OutputFormat,
    /// Output directory; defaults to the input file's directory.
    pub out_dir: Option<PathBuf>,
    /// Stem for output files instead of the input file stem.
    pub base_name: Option<String>,
    /// Raster resolution, PNG only.
    pub dpi: Option<u32>,
    pub renderer: RendererKind,
    pub inkscape_cli: InkscapeCli,
    /// Join frames after rendering when the format supports it.
    pub concat: bool,
    /// Frame rate of the MP4 assembled from PNG frames; no video when unset.
    pub video_fps: Option<u32>,
    pub tools: ToolPaths,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pdf,
            out_dir: None,
            base_name: None,
            dpi: None,
            renderer: RendererKind::Inkscape,
            inkscape_cli: InkscapeCli::Modern,
            concat: true,
            video_fps: None,
            tools: ToolPaths::default(),
        }
    }
}

impl ExportOpts {
    pub fn validate(&self) -> LayerExportResult<()> {
        if self.dpi == Some(0) {
            return Err(LayerExportError::validation("dpi must be non-zero"));
        }
        if self.video_fps == Some(0) {
            return Err(LayerExportError::validation("video fps must be non-zero"));
        }
        if self.video_fps.is_some() && self.format != OutputFormat::Png {
            return Err(LayerExportError::validation(
                "video output is assembled from png frames; use --format png",
            ));
        }
        if self.renderer == RendererKind::Resvg
            && !matches!(self.format, OutputFormat::Png | OutputFormat::Svg)
        {
            return Err(LayerExportError::validation(format!(
                "the resvg renderer only produces png, not {}",
                self.format.extension()
            )));
        }
        if let Some(name) = &self.base_name
            && name.trim().is_empty()
        {
            return Err(LayerExportError::validation("base name must not be empty"));
        }
        Ok(())
    }

    /// Renderer for the configured format. SVG output never needs an external tool.
    ///
    /// `resources_dir` is the input document's directory. Inkscape snapshots are written there so
    /// relative links keep resolving.
    pub fn make_renderer(&self, resources_dir: Option<PathBuf>) -> Box<dyn FrameRenderer> {
        match (self.format, self.renderer) {
            (OutputFormat::Svg, _) => Box::new(SnapshotRenderer),
            (_, RendererKind::Resvg) => Box::new(ResvgRenderer::new(resources_dir)),
            (_, RendererKind::Inkscape) => Box::new(InkscapeRenderer::new(
                self.tools.inkscape.clone(),
                self.inkscape_cli,
                resources_dir
                    .filter(|d| !d.as_os_str().is_empty())
                    .unwrap_or_else(|| PathBuf::from(".")),
            )),
        }
    }

    /// Concatenator for the configured format, if it concatenates at all.
    pub fn make_concatenator(&self) -> Option<Box<dyn Concatenator>> {
        if !self.concat {
            return None;
        }
        match (self.format, self.video_fps) {
            (OutputFormat::Pdf, _) => Some(Box::new(PdftkConcatenator::new(self.tools.pdftk.clone()))),
            (OutputFormat::Png, Some(fps)) => {
                Some(Box::new(FfmpegConcatenator::new(self.tools.ffmpeg.clone(), fps)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/opts.rs"]
mod tests;
