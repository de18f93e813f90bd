//! Export one file per frame from an SVG drawing whose layer labels say when each layer is shown.
//!
//! A layer labelled `title__[1, 3--5, 8--end]` is visible in frames 1, 3, 4, 5 and 8 through the
//! last frame; layers without a `__[...]` spec are hidden everywhere. The last frame is the largest
//! number written in any spec.
//!
//! - Load a [`Document`] and resolve its [`LayerSet`]
//! - Run an [`ExportSession`] with a [`FrameRenderer`] (Inkscape, resvg or plain SVG)
//! - Optionally join the frames with a [`Concatenator`] (pdftk, ffmpeg)
#![forbid(unsafe_code)]

pub mod document;
pub mod export;
mod foundation;
pub mod frames;
pub mod layer;
pub mod render;

pub use crate::document::style::{StyleMap, toggle_display};
pub use crate::document::tree::{Document, NodeId};
pub use crate::export::export_file;
pub use crate::export::naming::OutputNaming;
pub use crate::export::opts::{ExportOpts, ToolPaths};
pub use crate::export::session::{
    CancelToken, CombinedOutcome, ExportReport, ExportSession, FrameOutcome,
};
pub use crate::foundation::error::{LayerExportError, LayerExportResult, ToolFailure};
pub use crate::frames::resolve::resolve_max_frame;
pub use crate::frames::spec::{FrameSet, expand, extract_spec_text};
pub use crate::layer::{Layer, LayerSet, LayerState, LayerSummary};
pub use crate::render::inkscape::InkscapeCli;
pub use crate::render::{
    Concatenator, FrameRenderer, OutputFormat, RenderRequest, RendererKind,
};
