use std::ffi::OsStr;
use std::process::{Command, Stdio};

use crate::foundation::error::ToolFailure;

/// Run `cmd` to completion; any non-zero exit is a [`ToolFailure`] carrying the argv and stderr.
pub(crate) fn run_tool(tool: &str, cmd: &mut Command) -> Result<(), ToolFailure> {
    let command = display_command(cmd);
    tracing::debug!(%command, "running {tool}");

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            ToolFailure::new(
                tool,
                command.as_str(),
                "not started",
                format!("failed to spawn {tool} (is it installed and on PATH?): {e}"),
            )
        })?;

    if !output.status.success() {
        return Err(ToolFailure::new(
            tool,
            command,
            output.status.to_string(),
            String::from_utf8_lossy(&output.stderr),
        ));
    }
    Ok(())
}

/// Probe whether `program` can be started at all.
pub fn is_tool_on_path(program: &OsStr, version_flag: &str) -> bool {
    Command::new(program)
        .arg(version_flag)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Shell-like rendering of a command line, for messages only.
pub(crate) fn display_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '\'') {
                format!("'{}'", arg.replace('\'', r"'\''"))
            } else {
                arg.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/render/process.rs"]
mod tests;
