use std::ffi::OsString;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::foundation::error::ToolFailure;
use crate::render::process::run_tool;
use crate::render::{FrameRenderer, OutputFormat, RenderRequest};

/// Prefix of the transient snapshot handed to Inkscape.
pub const SNAPSHOT_PREFIX: &str = "__tmp__";

/// Command-line dialect of the installed Inkscape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InkscapeCli {
    /// Inkscape 1.x: `--export-type` / `--export-filename`.
    #[default]
    Modern,
    /// Inkscape 0.92: `--file`, `--without-gui`, `--export-<format>=`.
    Legacy,
}

/// Renders each frame by running Inkscape on a temporary copy of the snapshot.
#[derive(Clone, Debug)]
pub struct InkscapeRenderer {
    program: PathBuf,
    cli: InkscapeCli,
    scratch_dir: PathBuf,
}

impl InkscapeRenderer {
    /// `scratch_dir` receives the transient `__tmp__*.svg` snapshots (removed after each frame).
    pub fn new(program: impl Into<PathBuf>, cli: InkscapeCli, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cli,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Build the Inkscape invocation for one frame.
    pub fn command(
        &self,
        svg_path: &Path,
        out_path: &Path,
        format: OutputFormat,
        dpi: Option<u32>,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        match self.cli {
            InkscapeCli::Modern => {
                cmd.args(["--export-area-page", "--export-ignore-filters"])
                    .arg(format!("--export-type={}", format.extension()))
                    .arg(flag_with_path("--export-filename=", out_path));
                if let Some(dpi) = dpi.filter(|_| format.is_raster()) {
                    cmd.arg(format!("--export-dpi={dpi}"));
                }
                cmd.arg(svg_path);
            }
            InkscapeCli::Legacy => {
                cmd.arg(flag_with_path("--file=", svg_path))
                    .args(["--export-area-page", "--without-gui", "--export-ignore-filters"])
                    .arg(flag_with_path(legacy_export_flag(format), out_path));
                if let Some(dpi) = dpi.filter(|_| format.is_raster()) {
                    cmd.arg(format!("--export-dpi={dpi}"));
                }
            }
        }
        cmd
    }
}

impl FrameRenderer for InkscapeRenderer {
    fn name(&self) -> &'static str {
        "inkscape"
    }

    fn render(&mut self, req: &RenderRequest<'_>) -> Result<(), ToolFailure> {
        let write_failed = |e: std::io::Error| {
            ToolFailure::new(
                "inkscape",
                format!("write snapshot into '{}'", self.scratch_dir.display()),
                "not started",
                e.to_string(),
            )
        };

        let mut snapshot = tempfile::Builder::new()
            .prefix(SNAPSHOT_PREFIX)
            .suffix(".svg")
            .tempfile_in(&self.scratch_dir)
            .map_err(write_failed)?;
        snapshot
            .write_all(req.svg.as_bytes())
            .and_then(|()| snapshot.flush())
            .map_err(write_failed)?;

        let mut cmd = self.command(snapshot.path(), req.out_path, req.format, req.dpi);
        run_tool("inkscape", &mut cmd)
    }
}

fn legacy_export_flag(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Pdf => "--export-pdf=",
        OutputFormat::Png => "--export-png=",
        OutputFormat::Svg => "--export-plain-svg=",
        OutputFormat::Eps => "--export-eps=",
        OutputFormat::Ps => "--export-ps=",
    }
}

fn flag_with_path(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path);
    arg
}

#[cfg(test)]
#[path = "../../tests/unit/render/inkscape.rs"]
mod tests;
