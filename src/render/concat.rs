use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::foundation::error::ToolFailure;
use crate::render::Concatenator;
use crate::render::process::run_tool;

/// `pdftk <frames...> cat output <combined.pdf>`.
#[derive(Clone, Debug)]
pub struct PdftkConcatenator {
    program: PathBuf,
}

impl PdftkConcatenator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn command(&self, inputs: &[PathBuf], out_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(inputs).args(["cat", "output"]).arg(out_path);
        cmd
    }
}

impl Concatenator for PdftkConcatenator {
    fn name(&self) -> &'static str {
        "pdftk"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn concat(&mut self, inputs: &[PathBuf], out_path: &Path) -> Result<(), ToolFailure> {
        run_tool("pdftk", &mut self.command(inputs, out_path))
    }
}

/// Encodes PNG frames into an H.264 MP4 through ffmpeg's concat demuxer.
#[derive(Clone, Debug)]
pub struct FfmpegConcatenator {
    program: PathBuf,
    fps: u32,
}

impl FfmpegConcatenator {
    pub fn new(program: impl Into<PathBuf>, fps: u32) -> Self {
        Self {
            program: program.into(),
            fps: fps.max(1),
        }
    }

    /// Concat-demuxer script: every frame shown for `1/fps` seconds.
    pub fn frame_list(&self, inputs: &[PathBuf]) -> String {
        let mut list = String::from("ffconcat version 1.0\n");
        for path in inputs {
            let abs = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            let quoted = abs.to_string_lossy().replace('\'', r"'\''");
            list.push_str(&format!("file '{quoted}'\nduration 1/{}\n", self.fps));
        }
        list
    }

    pub fn command(&self, list_path: &Path, out_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-loglevel", "error", "-f", "concat", "-safe", "0", "-i"])
            .arg(list_path)
            .args([
                "-an",
                "-r",
                &self.fps.to_string(),
                // yuv420p needs even dimensions.
                "-vf",
                "scale=trunc(iw/2)*2:trunc(ih/2)*2",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ])
            .arg(out_path);
        cmd
    }
}

impl Concatenator for FfmpegConcatenator {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn extension(&self) -> &'static str {
        "mp4"
    }

    fn concat(&mut self, inputs: &[PathBuf], out_path: &Path) -> Result<(), ToolFailure> {
        let dir = out_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut list = tempfile::Builder::new()
            .prefix("__frames__")
            .suffix(".ffconcat")
            .tempfile_in(dir)
            .map_err(|e| list_failed(dir, e))?;
        list.write_all(self.frame_list(inputs).as_bytes())
            .and_then(|()| list.flush())
            .map_err(|e| list_failed(dir, e))?;

        run_tool("ffmpeg", &mut self.command(list.path(), out_path))
    }
}

fn list_failed(dir: &Path, e: std::io::Error) -> ToolFailure {
    ToolFailure::new(
        "ffmpeg",
        format!("write frame list into '{}'", dir.display()),
        "not started",
        e.to_string(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/concat.rs"]
mod tests;
