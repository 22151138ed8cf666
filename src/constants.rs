//! Shared application-wide constants.
//! Centralizes tweakable values used across rendering, interaction and export.

// Polygon defaults
/// Radius (in canvas pixels) given to every newly created polygon.
pub const DEFAULT_RADIUS: u32 = 30;
/// Side count selected when the application starts.
pub const DEFAULT_SIDES: u32 = 5;
/// Smallest side count offered by the selector.
pub const MIN_SIDES: u32 = 3;
/// Largest side count offered by the selector.
pub const MAX_SIDES: u32 = 20;
/// Largest radius accepted from an arrangement file.
pub const MAX_RADIUS: u32 = 10_000;

// Canvas
/// Minimum canvas width in logical pixels.
pub const CANVAS_MIN_WIDTH: f32 = 1200.0;
/// Minimum canvas height in logical pixels.
pub const CANVAS_MIN_HEIGHT: f32 = 800.0;

// Drawing
/// Stroke width of connection lines.
pub const CONNECTION_STROKE_WIDTH: f32 = 2.0;
/// Stroke width of polygon outlines.
pub const OUTLINE_STROKE_WIDTH: f32 = 2.0;

/// Canvas background ("lightblue").
pub const BACKGROUND_RGB: [u8; 3] = [173, 216, 230];
/// Connection line color ("red").
pub const CONNECTION_RGB: [u8; 3] = [255, 0, 0];
/// Polygon fill color ("blue").
pub const POLYGON_FILL_RGB: [u8; 3] = [0, 0, 255];
/// Polygon outline color ("black").
pub const POLYGON_OUTLINE_RGB: [u8; 3] = [0, 0, 0];
