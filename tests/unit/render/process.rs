use super::*;

#[test]
fn display_quotes_only_when_needed() {
    let mut cmd = Command::new("pdftk");
    cmd.args(["a b.pdf", "c.pdf", "it's.pdf", "cat", "output", ""]);
    assert_eq!(
        display_command(&cmd),
        r"pdftk 'a b.pdf' c.pdf 'it'\''s.pdf' cat output ''"
    );
}

#[test]
fn missing_program_is_reported_as_not_started() {
    let mut cmd = Command::new("layer-export-no-such-tool");
    cmd.arg("--flag");
    let err = run_tool("ghost", &mut cmd).unwrap_err();
    assert_eq!(err.tool, "ghost");
    assert_eq!(err.status, "not started");
    assert_eq!(err.command, "layer-export-no-such-tool --flag");
    assert!(!is_tool_on_path(OsStr::new("layer-export-no-such-tool"), "--version"));
}

#[cfg(unix)]
#[test]
fn non_zero_exit_carries_status_and_stderr() {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", "echo broken >&2; exit 3"]);
    let err = run_tool("sh", &mut cmd).unwrap_err();
    assert!(err.status.contains('3'), "{}", err.status);
    assert_eq!(err.stderr, "broken");

    let mut ok = Command::new("sh");
    ok.args(["-c", "exit 0"]);
    assert!(run_tool("sh", &mut ok).is_ok());
}
