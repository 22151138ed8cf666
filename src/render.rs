//! Surface-independent scene rendering.
//!
//! The scene is drawn in three layers: the background, then every connection, then
//! every polygon. The on-screen canvas and the image exporters all implement
//! [`Surface`], so they share this one drawing routine and produce the same picture.

use crate::constants;
use crate::geometry::{polygon_vertices, Point};
use crate::types::Scene;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a color from a `[r, g, b]` constant.
    pub const fn from_array(rgb: [u8; 3]) -> Self {
        Self(rgb[0], rgb[1], rgb[2])
    }

    /// `#rrggbb` form, as used by SVG.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Canvas background.
pub const BACKGROUND: Rgb = Rgb::from_array(constants::BACKGROUND_RGB);
/// Connection lines.
pub const CONNECTION: Rgb = Rgb::from_array(constants::CONNECTION_RGB);
/// Polygon interiors.
pub const POLYGON_FILL: Rgb = Rgb::from_array(constants::POLYGON_FILL_RGB);
/// Polygon outlines.
pub const POLYGON_OUTLINE: Rgb = Rgb::from_array(constants::POLYGON_OUTLINE_RGB);

/// Something the scene can be drawn onto. Coordinates are canvas pixels.
pub trait Surface {
    /// Fills the whole drawing region with `color`.
    fn fill_background(&mut self, color: Rgb);

    /// Draws a straight line segment.
    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f32);

    /// Draws a closed polygon, filled and outlined.
    fn polygon(&mut self, points: &[Point], fill: Rgb, outline: Rgb, width: f32);
}

/// Draws `scene` onto `surface`: background, connections, then polygons.
pub fn render_scene<S: Surface + ?Sized>(scene: &Scene, surface: &mut S) {
    surface.fill_background(BACKGROUND);

    for conn in &scene.connections {
        // Only reachable through a hand-edited scene; loaded files are validated.
        let (Some(start), Some(end)) = (scene.nodes.get(conn.start), scene.nodes.get(conn.end))
        else {
            continue;
        };
        surface.line(
            start.center,
            end.center,
            CONNECTION,
            constants::CONNECTION_STROKE_WIDTH,
        );
    }

    for node in &scene.nodes {
        let points = polygon_vertices(node.center, node.radius, node.sides);
        surface.polygon(
            &points,
            POLYGON_FILL,
            POLYGON_OUTLINE,
            constants::OUTLINE_STROKE_WIDTH,
        );
    }
}
