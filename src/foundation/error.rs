use std::fmt;

/// Crate-wide result type.
pub type LayerExportResult<T> = Result<T, LayerExportError>;

/// Errors surfaced by document loading, frame-spec parsing and export.
///
/// Parsing-phase variants are fatal for a run. [`ToolFailure`] is recovered per frame by the
/// export session and reaches callers through the [`crate::ExportReport`], which turns it into
/// [`LayerExportError::ExternalTool`] on request ([`crate::ExportReport::ensure_clean`]).
#[derive(thiserror::Error, Debug)]
pub enum LayerExportError {
    /// A style entry has no `key:value` separator.
    #[error(
        "malformed style entry '{entry}' in style '{style}'{} (missing ':')",
        fmt_location(.layer, .frame)
    )]
    MalformedStyle {
        /// Label of the layer whose style was rewritten; empty outside a layer.
        layer: String,
        /// Frame being applied when the style was rewritten.
        frame: Option<u32>,
        /// The offending `;`-separated entry.
        entry: String,
        /// The full style string it came from.
        style: String,
    },

    /// A frame-spec token is not an integer once ranges were removed.
    #[error("invalid frame token '{token}' in layer '{layer}'")]
    InvalidFrameToken {
        /// Label of the layer carrying the spec.
        layer: String,
        /// The offending token.
        token: String,
    },

    /// No layer carries a `__[...]` frame spec, so there is no frame range to render.
    #[error("no layer carries a frame spec (expected labels like 'name__[1,3--end]')")]
    NoFrameSpecsFound,

    /// An external renderer or concatenation tool failed.
    #[error(transparent)]
    ExternalTool(#[from] ToolFailure),

    /// The input could not be read or parsed as XML.
    #[error("failed to load document '{path}': {reason}")]
    DocumentLoad {
        /// Input path, or `<memory>` for in-memory documents.
        path: String,
        /// Reader or parser message.
        reason: String,
    },

    /// Invalid options.
    #[error("validation error: {0}")]
    Validation(String),

    /// The cancellation hook fired between frames.
    #[error("export cancelled before frame {frame}")]
    Cancelled {
        /// First frame that was not rendered.
        frame: u32,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerExportError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn document_load(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::DocumentLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_token(layer: impl Into<String>, token: impl Into<String>) -> Self {
        Self::InvalidFrameToken {
            layer: layer.into(),
            token: token.into(),
        }
    }
}

/// A failed external process invocation.
///
/// `command` is the argv joined for display only; processes are always spawned from an
/// argument list, never through a shell.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[error("{tool} failed ({status}); tried to execute `{command}`{}", fmt_stderr(.stderr))]
pub struct ToolFailure {
    /// Short tool name (`inkscape`, `pdftk`, `ffmpeg`, `resvg`, ...).
    pub tool: String,
    /// The attempted command line.
    pub command: String,
    /// Exit status, or a reason the process never ran.
    pub status: String,
    /// Trimmed stderr output (may be empty).
    pub stderr: String,
}

impl ToolFailure {
    pub fn new(
        tool: impl Into<String>,
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            command: command.into(),
            status: status.into(),
            stderr: stderr.into().trim().to_string(),
        }
    }
}

fn fmt_location(layer: &str, frame: &Option<u32>) -> String {
    let layer = if layer.is_empty() {
        String::new()
    } else {
        format!(" of layer '{layer}'")
    };
    let frame = frame.map(|f| format!(" in frame {f}")).unwrap_or_default();
    format!("{layer}{frame}")
}

fn fmt_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
