use super::*;
use crate::render::process::display_command;

fn renderer(cli: InkscapeCli) -> InkscapeRenderer {
    InkscapeRenderer::new("inkscape", cli, ".")
}

#[test]
fn modern_command_uses_export_type_and_filename() {
    let cmd = renderer(InkscapeCli::Modern).command(
        Path::new("__tmp__.svg"),
        Path::new("out/scene-03.pdf"),
        OutputFormat::Pdf,
        Some(300),
    );
    assert_eq!(
        display_command(&cmd),
        "inkscape --export-area-page --export-ignore-filters --export-type=pdf \
         --export-filename=out/scene-03.pdf __tmp__.svg"
    );
}

#[test]
fn dpi_is_passed_for_raster_output_only() {
    let cmd = renderer(InkscapeCli::Modern).command(
        Path::new("in.svg"),
        Path::new("scene-01.png"),
        OutputFormat::Png,
        Some(150),
    );
    assert!(display_command(&cmd).contains("--export-dpi=150"));
}

#[test]
fn legacy_command_matches_inkscape_092() {
    let cmd = renderer(InkscapeCli::Legacy).command(
        Path::new("__tmp__.svg"),
        Path::new("scene-01.pdf"),
        OutputFormat::Pdf,
        None,
    );
    assert_eq!(
        display_command(&cmd),
        "inkscape --file=__tmp__.svg --export-area-page --without-gui --export-ignore-filters \
         --export-pdf=scene-01.pdf"
    );
}

#[test]
fn paths_with_spaces_stay_one_argument() {
    let cmd = renderer(InkscapeCli::Modern).command(
        Path::new("my drawing.svg"),
        Path::new("my out.pdf"),
        OutputFormat::Pdf,
        None,
    );
    let args: Vec<_> = cmd.get_args().collect();
    assert_eq!(args.len(), 5);
    assert_eq!(args[3], "--export-filename=my out.pdf");
    assert_eq!(args[4], "my drawing.svg");
}

#[test]
fn missing_binary_fails_the_frame_and_removes_the_snapshot() {
    let scratch = tempfile::tempdir().unwrap();
    let mut r = InkscapeRenderer::new("layer-export-no-inkscape", InkscapeCli::Modern, scratch.path());
    let out = scratch.path().join("x-01.pdf");
    let err = r
        .render(&RenderRequest {
            frame: 1,
            svg: "<svg/>",
            out_path: &out,
            format: OutputFormat::Pdf,
            dpi: None,
        })
        .unwrap_err();
    assert_eq!(err.status, "not started");
    assert!(err.command.starts_with("layer-export-no-inkscape "));
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}
