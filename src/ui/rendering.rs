//! Canvas rendering through the egui painter.

use super::state::PolygonEditorApp;
use crate::geometry::Point;
use crate::render::{render_scene, Rgb, Surface};
use eframe::egui;

/// Draws onto an egui painter, offsetting canvas coordinates by the canvas origin.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> PainterSurface<'a> {
    /// Wraps `painter`; canvas point (0, 0) maps to `rect.min`.
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, point: Point) -> egui::Pos2 {
        self.rect.min + egui::vec2(point.x as f32, point.y as f32)
    }
}

fn color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.0, color.1, color.2)
}

impl Surface for PainterSurface<'_> {
    fn fill_background(&mut self, color: Rgb) {
        self.painter.rect_filled(self.rect, 0.0, color32(color));
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(width, color32(color)),
        );
    }

    fn polygon(&mut self, points: &[Point], fill: Rgb, outline: Rgb, width: f32) {
        let points: Vec<egui::Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        // Regular polygons are always convex.
        self.painter.add(egui::Shape::convex_polygon(
            points,
            color32(fill),
            egui::Stroke::new(width, color32(outline)),
        ));
    }
}

impl PolygonEditorApp {
    /// Paints the scene into the canvas rectangle.
    pub fn render_scene_elements(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let mut surface = PainterSurface::new(painter, canvas_rect);
        render_scene(&self.scene, &mut surface);
    }
}
