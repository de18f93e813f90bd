//! Frame-by-frame export of a layered drawing.

/// Output file naming.
pub mod naming;
/// Run options and renderer selection.
pub mod opts;
/// The per-frame loop.
pub mod session;

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Context as _;

use crate::document::tree::Document;
use crate::foundation::error::LayerExportResult;
use crate::layer::LayerSet;
use crate::render::{Concatenator, OutputFormat, RendererKind, is_tool_on_path};

use naming::OutputNaming;
use opts::ExportOpts;
use session::{CancelToken, ExportReport, ExportSession};

/// Load `input`, resolve its layers and render every frame.
///
/// Parsing-phase errors abort before anything is written. Per-frame render failures and a failed
/// concatenation are reported in the returned [`ExportReport`].
#[tracing::instrument(skip(opts, cancel), fields(format = ?opts.format))]
pub fn export_file(
    input: &Path,
    opts: &ExportOpts,
    cancel: &CancelToken,
) -> LayerExportResult<ExportReport> {
    opts.validate()?;

    let mut doc = Document::from_path(input)?;
    let layers = LayerSet::from_document(&doc)?;
    let naming = OutputNaming::for_input(input, opts)?;

    if !naming.dir().as_os_str().is_empty() {
        std::fs::create_dir_all(naming.dir()).with_context(|| {
            format!("failed to create output directory '{}'", naming.dir().display())
        })?;
    }

    warn_missing_tools(opts);

    let mut renderer = opts.make_renderer(input.parent().map(Path::to_path_buf));
    let mut concatenator = opts.make_concatenator();
    let concat: Option<&mut dyn Concatenator> = match concatenator.as_mut() {
        Some(c) => Some(c.as_mut()),
        None => None,
    };

    let mut session = ExportSession::new(&mut doc, &layers, naming, opts.format, opts.dpi);
    session.run(renderer.as_mut(), concat, cancel)
}

/// Warn up front when a needed program is missing; each frame would fail anyway.
fn warn_missing_tools(opts: &ExportOpts) {
    let mut needed: Vec<(&OsStr, &str)> = Vec::new();
    if opts.format != OutputFormat::Svg && opts.renderer == RendererKind::Inkscape {
        needed.push((opts.tools.inkscape.as_os_str(), "--version"));
    }
    if opts.concat {
        match (opts.format, opts.video_fps) {
            (OutputFormat::Pdf, _) => needed.push((opts.tools.pdftk.as_os_str(), "--version")),
            (OutputFormat::Png, Some(_)) => needed.push((opts.tools.ffmpeg.as_os_str(), "-version")),
            _ => {}
        }
    }
    for (program, flag) in needed {
        if !is_tool_on_path(program, flag) {
            tracing::warn!("'{}' was not found or does not run", program.to_string_lossy());
        }
    }
}
