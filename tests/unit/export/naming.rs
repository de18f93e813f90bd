use super::*;
use crate::render::OutputFormat;

#[test]
fn frames_are_numbered_next_to_the_input() {
    let naming = OutputNaming::for_input(Path::new("drawings/scene.svg"), &ExportOpts::default()).unwrap();
    assert_eq!(naming.frame_path(3), PathBuf::from("drawings/scene-03.pdf"));
    assert_eq!(naming.frame_path(12), PathBuf::from("drawings/scene-12.pdf"));
    assert_eq!(naming.frame_path(123), PathBuf::from("drawings/scene-123.pdf"));
    assert_eq!(naming.combined_path("pdf"), PathBuf::from("drawings/scene_all.pdf"));
}

#[test]
fn bare_file_name_writes_to_the_working_directory() {
    let naming = OutputNaming::for_input(Path::new("scene.svg"), &ExportOpts::default()).unwrap();
    assert_eq!(naming.frame_path(1), PathBuf::from("scene-01.pdf"));
    assert_eq!(naming.dir(), Path::new(""));
}

#[test]
fn explicit_name_and_directory_override_the_input() {
    let opts = ExportOpts {
        format: OutputFormat::Png,
        out_dir: Some(PathBuf::from("out")),
        base_name: Some("slides".to_string()),
        ..ExportOpts::default()
    };
    let naming = OutputNaming::for_input(Path::new("drawings/scene.svg"), &opts).unwrap();
    assert_eq!(naming.frame_path(1), PathBuf::from("out/slides-01.png"));
    assert_ne!(naming.frame_path(1), naming.frame_path(2));
    assert_eq!(naming.combined_path("mp4"), PathBuf::from("out/slides_all.mp4"));
}

#[test]
fn input_without_a_stem_is_rejected() {
    assert!(OutputNaming::for_input(Path::new("/"), &ExportOpts::default()).is_err());
}
