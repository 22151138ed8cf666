//! Application state management structures.
//!
//! The editor owns exactly one [`Scene`] and one [`InteractionController`]; every
//! UI callback reaches them through [`PolygonEditorApp`]. Only user preferences
//! (side count, last directory) survive a restart; the scene lives in arrangement
//! files.

use crate::constants;
use crate::controller::InteractionController;
use crate::types::Scene;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage key under which [`PolygonEditorApp`] preferences are persisted.
pub const APP_STATE_KEY: &str = "app_state";

/// Geometry of the drawing area, refreshed every frame.
#[derive(Debug, Clone, Copy)]
pub struct CanvasState {
    /// Screen-space rectangle the canvas occupied in the last frame
    pub rect: egui::Rect,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            rect: egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(constants::CANVAS_MIN_WIDTH, constants::CANVAS_MIN_HEIGHT),
            ),
        }
    }
}

impl CanvasState {
    /// Canvas size in whole pixels, as used for image export.
    pub fn pixel_size(&self) -> (u32, u32) {
        let size = self.rect.size();
        (
            size.x.round().max(1.0) as u32,
            size.y.round().max(1.0) as u32,
        )
    }
}

/// File action requested from the toolbar, run at the start of the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Clear the scene
    New,
    /// Ask for a path and save the arrangement there
    SaveArrangement,
    /// Ask for a path and load the arrangement stored there
    LoadArrangement,
    /// Ask for a path and export the canvas as PNG
    ExportPng,
    /// Ask for a path and export the canvas as SVG
    ExportSvg,
}

/// State related to file operations.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileState {
    /// Arrangement file last saved or loaded
    #[serde(skip)]
    pub current_path: Option<PathBuf>,
    /// Directory file dialogs open in
    pub last_directory: Option<PathBuf>,
    /// Action queued by the toolbar
    #[serde(skip)]
    pub pending_action: Option<FileAction>,
}

/// A blocking message shown in a modal window until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Window title
    pub title: String,
    /// Message body
    pub message: String,
}

/// The main application structure.
///
/// This struct implements the `eframe::App` trait and owns the scene, the editing
/// session and the shell's own bookkeeping.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonEditorApp {
    /// The polygons and connections being edited
    #[serde(skip)]
    pub scene: Scene,
    /// Mode state machine and polygon defaults
    pub controller: InteractionController,
    /// Canvas geometry
    #[serde(skip)]
    pub canvas: CanvasState,
    /// File operations state
    pub file: FileState,
    /// Most recent status line
    #[serde(skip)]
    pub status: String,
    /// Modal notice awaiting acknowledgement
    #[serde(skip)]
    pub notice: Option<Notice>,
}

impl Default for PolygonEditorApp {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            controller: InteractionController::new(),
            canvas: CanvasState::default(),
            file: FileState::default(),
            status: crate::controller::Mode::None.prompt().to_owned(),
            notice: None,
        }
    }
}

impl PolygonEditorApp {
    /// Serializes the persisted preferences to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restores an application from persisted preferences.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Restores the app from eframe storage, falling back to defaults.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(json) = storage.and_then(|s| s.get_string(APP_STATE_KEY)) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(app) => app,
            Err(err) => {
                log::warn!("Ignoring unreadable saved preferences: {err}");
                Self::default()
            }
        }
    }

    /// Shows `message` in a modal window.
    pub fn show_notice(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notice = Some(Notice {
            title: title.into(),
            message: message.into(),
        });
    }
}
