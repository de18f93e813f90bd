use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::ToolFailure;
use crate::render::{FrameRenderer, OutputFormat, RenderRequest};

/// Resolution at which one SVG user unit is one pixel.
pub const BASE_DPI: u32 = 96;

const MAX_DIM: u32 = 16_384;

/// In-process PNG renderer built on `usvg`/`resvg`.
pub struct ResvgRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
    resources_dir: Option<PathBuf>,
}

impl ResvgRenderer {
    /// `resources_dir` resolves relative image links and is searched for extra fonts.
    pub fn new(resources_dir: Option<PathBuf>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = resources_dir.as_deref() {
            load_fonts_from_dir(&mut db, dir);
            load_fonts_from_dir(&mut db, &dir.join("fonts"));
        }
        Self {
            fontdb: Arc::new(db),
            resources_dir,
        }
    }

    /// Rasterize `svg` to straight-alpha RGBA8, scaled by `dpi / 96`.
    pub fn rasterize(&self, svg: &str, dpi: Option<u32>) -> Result<(u32, u32, Vec<u8>), String> {
        let opts = usvg::Options {
            resources_dir: self.resources_dir.clone(),
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts).map_err(|e| format!("parse svg: {e}"))?;

        let scale = dpi.map_or(1.0, |d| d as f32 / BASE_DPI as f32);
        let width = to_px(tree.size().width() * scale)?;
        let height = to_px(tree.size().height() * scale)?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| "failed to allocate pixmap".to_string())?;
        let sx = width as f32 / tree.size().width();
        let sy = height as f32 / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok((width, height, rgba))
    }
}

impl FrameRenderer for ResvgRenderer {
    fn name(&self) -> &'static str {
        "resvg"
    }

    fn render(&mut self, req: &RenderRequest<'_>) -> Result<(), ToolFailure> {
        let command = format!("resvg (in-process) -> {}", req.out_path.display());
        if req.format != OutputFormat::Png {
            return Err(ToolFailure::new(
                "resvg",
                command,
                "not started",
                format!("resvg only renders png, not {}", req.format.extension()),
            ));
        }

        let (width, height, rgba) = self
            .rasterize(req.svg, req.dpi)
            .map_err(|e| ToolFailure::new("resvg", command.as_str(), "failed", e))?;

        image::save_buffer_with_format(
            req.out_path,
            &rgba,
            width,
            height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| ToolFailure::new("resvg", command.as_str(), "failed", format!("write png: {e}")))
    }
}

fn to_px(v: f32) -> Result<u32, String> {
    if !v.is_finite() || v <= 0.0 {
        return Err("svg has invalid width/height".to_string());
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(format!("raster size {px} exceeds {MAX_DIM} pixels"));
    }
    Ok(px)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let fonts = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_font_file(path));
    for path in fonts {
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!("skipping font {}: {e}", path.display());
        }
    }
}

fn is_font_file(path: &Path) -> bool {
    const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
