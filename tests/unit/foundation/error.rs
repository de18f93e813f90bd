use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayerExportError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LayerExportError::document_load("in.svg", "boom")
            .to_string()
            .contains("failed to load document 'in.svg': boom")
    );
    assert!(
        LayerExportError::invalid_token("fx__[a]", "a")
            .to_string()
            .contains("layer 'fx__[a]'")
    );
    assert!(
        LayerExportError::NoFrameSpecsFound
            .to_string()
            .contains("no layer carries a frame spec")
    );
}

#[test]
fn tool_failure_names_the_attempted_command() {
    let f = ToolFailure::new("pdftk", "pdftk a.pdf cat output b.pdf", "exit status: 1", " nope \n");
    let s = f.to_string();
    assert!(s.contains("pdftk failed (exit status: 1)"));
    assert!(s.contains("`pdftk a.pdf cat output b.pdf`"));
    assert!(s.ends_with(": nope"));

    let quiet = ToolFailure::new("pdftk", "pdftk", "exit status: 2", "");
    assert!(quiet.to_string().ends_with('`'));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayerExportError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
