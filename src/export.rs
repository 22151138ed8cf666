//! Export utilities: render the scene to SVG and PNG.
//!
//! Both formats go through the shared [`render_scene`] routine: the scene is first
//! written out as an SVG document, which `resvg` then rasterizes for PNG output.

use crate::error::{ArrangementError, Result};
use crate::geometry::Point;
use crate::persistence::write_atomically;
use crate::render::{render_scene, Rgb, Surface};
use crate::types::Scene;
use std::fmt::Write as _;
use std::path::Path;
use tiny_skia::Pixmap;

/// A [`Surface`] that accumulates SVG elements.
pub struct SvgSurface {
    width: u32,
    height: u32,
    body: String,
}

impl SvgSurface {
    /// Starts an empty document of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Closes the document and returns the SVG text.
    pub fn finish(self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn fill_background(&mut self, color: Rgb) {
        let _ = writeln!(
            self.body,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\" />",
            self.width,
            self.height,
            color.to_hex()
        );
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        let _ = writeln!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"square\" />",
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_hex(),
            width
        );
    }

    fn polygon(&mut self, points: &[Point], fill: Rgb, outline: Rgb, width: f32) {
        let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
        let _ = writeln!(
            self.body,
            "<polygon points=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />",
            coords.join(" "),
            fill.to_hex(),
            outline.to_hex(),
            width
        );
    }
}

/// Renders `scene` into an SVG document of the given size.
pub fn build_svg(scene: &Scene, width: u32, height: u32) -> String {
    let mut surface = SvgSurface::new(width, height);
    render_scene(scene, &mut surface);
    surface.finish()
}

/// Rasterizes `scene` into a pixmap of the given size.
pub fn render_pixmap(scene: &Scene, width: u32, height: u32) -> Result<Pixmap> {
    let width = width.max(1);
    let height = height.max(1);
    let svg = build_svg(scene, width, height);

    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default())
        .map_err(|e| ArrangementError::Export(format!("failed to parse rendered SVG: {e}")))?;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        ArrangementError::Export(format!("failed to create pixmap {width}x{height}"))
    })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Writes the scene as a PNG image of `width` x `height` pixels.
pub fn export_png(scene: &Scene, width: u32, height: u32, path: &Path) -> Result<()> {
    let pixmap = render_pixmap(scene, width, height)?;
    let bytes = pixmap
        .encode_png()
        .map_err(|e| ArrangementError::Export(format!("failed to encode PNG: {e}")))?;
    write_atomically(path, &bytes)?;
    log::info!(
        "Exported {}x{} PNG to {}",
        pixmap.width(),
        pixmap.height(),
        path.display()
    );
    Ok(())
}

/// Writes the scene as an SVG document of `width` x `height` pixels.
pub fn export_svg(scene: &Scene, width: u32, height: u32, path: &Path) -> Result<()> {
    let svg = build_svg(scene, width.max(1), height.max(1));
    write_atomically(path, svg.as_bytes())?;
    log::info!("Exported SVG to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BACKGROUND, CONNECTION, POLYGON_FILL};
    use std::path::PathBuf;

    fn temp_path(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("polygon_editor_{}.{ext}", uuid::Uuid::new_v4()))
    }

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_node(Point::new(100, 100), 30, 5);
        scene.add_node(Point::new(300, 100), 30, 3);
        scene.add_connection(0, 1);
        scene
    }

    fn rgb_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
        let px = pixmap.pixel(x, y).expect("pixel in bounds");
        assert_eq!(px.alpha(), 255);
        (px.red(), px.green(), px.blue())
    }

    #[test]
    fn svg_contains_every_element_in_order() {
        let svg = build_svg(&sample_scene(), 400, 300);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"400\" height=\"300\""));

        let rect = svg.find("<rect").expect("background");
        let line = svg.find("<line").expect("connection");
        let polygon = svg.find("<polygon").expect("polygon");
        assert!(rect < line && line < polygon);
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(svg.contains("x1=\"100\" y1=\"100\" x2=\"300\" y2=\"100\""));
    }

    #[test]
    fn pixmap_matches_canvas_colors() {
        let pixmap = render_pixmap(&sample_scene(), 400, 300).expect("render");
        assert_eq!((pixmap.width(), pixmap.height()), (400, 300));

        assert_eq!(rgb_at(&pixmap, 5, 5), (BACKGROUND.0, BACKGROUND.1, BACKGROUND.2));
        assert_eq!(
            rgb_at(&pixmap, 100, 100),
            (POLYGON_FILL.0, POLYGON_FILL.1, POLYGON_FILL.2)
        );
        let (r, g, b) = rgb_at(&pixmap, 200, 100);
        assert!(r > 200 && g < 60 && b < 60, "got {:?}, want {:?}", (r, g, b), CONNECTION);
    }

    #[test]
    fn png_export_has_requested_size() {
        let path = temp_path("png");
        export_png(&sample_scene(), 320, 240, &path).expect("export");
        let loaded = Pixmap::load_png(&path).expect("decode");
        let _ = std::fs::remove_file(&path);
        assert_eq!((loaded.width(), loaded.height()), (320, 240));
    }

    #[test]
    fn svg_export_writes_document() {
        let path = temp_path("svg");
        export_svg(&sample_scene(), 320, 240, &path).expect("export");
        let text = std::fs::read_to_string(&path).expect("read back");
        let _ = std::fs::remove_file(&path);
        assert!(text.contains("<polygon"));
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("polygon_editor_missing_{}", uuid::Uuid::new_v4()))
            .join("out.png");
        assert!(matches!(
            export_png(&sample_scene(), 10, 10, &path),
            Err(ArrangementError::Io { .. })
        ));
    }
}
