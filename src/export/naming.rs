use std::path::{Path, PathBuf};

use crate::export::opts::ExportOpts;
use crate::foundation::error::{LayerExportError, LayerExportResult};

/// Where frame outputs and the combined artifact are written.
///
/// Frame `n` goes to `<dir>/<stem>-<nn>.<ext>` (at least two digits), the combined file to
/// `<dir>/<stem>_all.<ext>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNaming {
    dir: PathBuf,
    stem: String,
    extension: String,
}

impl OutputNaming {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            extension: extension.into(),
        }
    }

    /// Derive naming from the input path and options.
    pub fn for_input(input: &Path, opts: &ExportOpts) -> LayerExportResult<Self> {
        let stem = match &opts.base_name {
            Some(name) => name.clone(),
            None => input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    LayerExportError::validation(format!(
                        "cannot derive an output name from '{}'",
                        input.display()
                    ))
                })?,
        };
        let dir = match &opts.out_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        Ok(Self::new(dir, stem, opts.format.extension()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, frame: u32) -> PathBuf {
        self.dir
            .join(format!("{}-{frame:02}.{}", self.stem, self.extension))
    }

    pub fn combined_path(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}_all.{extension}", self.stem))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/naming.rs"]
mod tests;
