//! Turning one frame's SVG snapshot into an output file, and joining the per-frame files.
//!
//! Renderers and concatenators report failure as [`ToolFailure`] so the export session can log
//! a broken frame and carry on with the next one.

/// Join per-frame outputs (`pdftk`, `ffmpeg`).
pub mod concat;
/// External Inkscape renderer.
pub mod inkscape;
mod process;
/// In-process PNG rasterization with resvg.
pub mod raster;
/// Plain SVG output.
pub mod snapshot;

use std::path::{Path, PathBuf};

use crate::foundation::error::ToolFailure;

pub use process::is_tool_on_path;

/// File format of the per-frame outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    Svg,
    Eps,
    Ps,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Eps => "eps",
            Self::Ps => "ps",
        }
    }

    /// Formats where a DPI setting changes the output.
    pub fn is_raster(self) -> bool {
        matches!(self, Self::Png)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    /// 1-based frame number.
    pub frame: u32,
    /// Serialized document with this frame's visibility applied.
    pub svg: &'a str,
    pub out_path: &'a Path,
    pub format: OutputFormat,
    pub dpi: Option<u32>,
}

/// Produces one output file per frame.
pub trait FrameRenderer {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;
    fn render(&mut self, req: &RenderRequest<'_>) -> Result<(), ToolFailure>;
}

/// Joins the successfully rendered frames into one artifact.
pub trait Concatenator {
    fn name(&self) -> &'static str;
    /// Extension of the combined file (`pdf`, `mp4`).
    fn extension(&self) -> &'static str;
    fn concat(&mut self, inputs: &[PathBuf], out_path: &Path) -> Result<(), ToolFailure>;
}

/// Which renderer handles non-SVG formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Run the `inkscape` binary once per frame.
    #[default]
    Inkscape,
    /// Rasterize in-process (PNG only).
    Resvg,
}
