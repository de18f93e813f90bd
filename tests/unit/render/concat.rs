use super::*;
use crate::render::process::display_command;

#[test]
fn pdftk_gets_the_explicit_frame_list() {
    let c = PdftkConcatenator::new("pdftk");
    let inputs = vec![PathBuf::from("scene-01.pdf"), PathBuf::from("scene-03.pdf")];
    assert_eq!(
        display_command(&c.command(&inputs, Path::new("scene_all.pdf"))),
        "pdftk scene-01.pdf scene-03.pdf cat output scene_all.pdf"
    );
    assert_eq!(c.extension(), "pdf");
}

#[test]
fn ffmpeg_frame_list_holds_each_frame_for_one_tick() {
    let c = FfmpegConcatenator::new("ffmpeg", 4);
    let list = c.frame_list(&[PathBuf::from("/tmp/a-01.png"), PathBuf::from("/tmp/it's-02.png")]);
    assert_eq!(
        list,
        "ffconcat version 1.0\n\
         file '/tmp/a-01.png'\nduration 1/4\n\
         file '/tmp/it'\\''s-02.png'\nduration 1/4\n"
    );
}

#[test]
fn ffmpeg_command_encodes_h264() {
    let c = FfmpegConcatenator::new("ffmpeg", 12);
    let s = display_command(&c.command(Path::new("list.ffconcat"), Path::new("scene_all.mp4")));
    assert!(s.starts_with("ffmpeg -y -loglevel error -f concat -safe 0 -i list.ffconcat"));
    assert!(s.contains("-r 12"));
    assert!(s.contains("-c:v libx264 -pix_fmt yuv420p"));
    assert!(s.ends_with("scene_all.mp4"));
}

#[test]
fn zero_fps_is_clamped() {
    let c = FfmpegConcatenator::new("ffmpeg", 0);
    assert!(c.frame_list(&[PathBuf::from("/x.png")]).contains("duration 1/1"));
}
