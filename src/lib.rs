//! # Polygon Editor
//!
//! An interactive editor for placing regular polygons on a canvas, connecting them
//! with lines, and moving or deleting them. Four editing modes drive the canvas:
//! - **Create**: click to place a polygon with the selected side count
//! - **Delete**: click a polygon to remove it and its connections
//! - **Move**: drag a polygon to a new position
//! - **Connect**: click two polygons to join them with a line
//!
//! ## Features
//! - Save and load arrangements as JSON
//! - Export the canvas as PNG or SVG
//! - Side count selectable from 3 to 20

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod controller;
pub mod error;
pub mod export;
pub mod geometry;
pub mod persistence;
pub mod render;
mod types;
mod ui;

// Re-export public types and functions
pub use controller::{Feedback, InteractionController, Mode, PointerButton, PointerEvent};
pub use error::ArrangementError;
pub use geometry::{polygon_vertices, Offset, Point};
pub use types::*;
pub use ui::PolygonEditorApp;

/// Runs the polygon editor.
///
/// This function opens the editor window and starts the main event loop. User
/// preferences saved by a previous session are restored.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use polygon_editor::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Polygon Editor")
            .with_inner_size([
                constants::CANVAS_MIN_WIDTH + 40.0,
                constants::CANVAS_MIN_HEIGHT + 80.0,
            ])
            .with_min_inner_size([
                constants::CANVAS_MIN_WIDTH,
                constants::CANVAS_MIN_HEIGHT,
            ]),
        ..Default::default()
    };
    eframe::run_native(
        "Polygon Editor",
        options,
        Box::new(|cc| Ok(Box::new(PolygonEditorApp::from_storage(cc.storage)))),
    )
}
