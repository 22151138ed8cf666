//! File operations: new, save, load and image export.
//!
//! Toolbar buttons only queue a [`FileAction`]; the action runs at the start of the
//! next frame, where a native file dialog is shown synchronously. Failures are
//! logged and shown in a modal notice; the scene is only replaced after a load has
//! fully succeeded.

use super::state::{FileAction, PolygonEditorApp};
use crate::error::Result;
use crate::{export, persistence};
use eframe::egui;
use std::path::{Path, PathBuf};

impl PolygonEditorApp {
    /// Queues a file action for the next frame.
    pub fn request_file_action(&mut self, action: FileAction) {
        self.file.pending_action = Some(action);
    }

    /// Runs the queued file action, if any.
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        let Some(action) = self.file.pending_action.take() else {
            return;
        };

        match action {
            FileAction::New => self.new_arrangement(),
            FileAction::SaveArrangement => {
                if let Some(path) = self.save_dialog("Save Arrangement", "JSON Files", "json") {
                    let result = self.save_arrangement_to(&path);
                    self.finish_file_action("Save failed", result);
                }
            }
            FileAction::LoadArrangement => {
                if let Some(path) = self.open_dialog("Load Arrangement", "JSON Files", "json") {
                    let result = self.load_arrangement_from(&path);
                    self.finish_file_action("Load failed", result);
                }
            }
            FileAction::ExportPng => {
                if let Some(path) = self.save_dialog("Save Image", "PNG Files", "png") {
                    let result = self.export_png_to(&path);
                    self.finish_file_action("Export failed", result);
                }
            }
            FileAction::ExportSvg => {
                if let Some(path) = self.save_dialog("Save Image", "SVG Files", "svg") {
                    let result = self.export_svg_to(&path);
                    self.finish_file_action("Export failed", result);
                }
            }
        }
        ctx.request_repaint();
    }

    /// Clears the scene and forgets the current file.
    pub fn new_arrangement(&mut self) {
        self.scene.clear();
        self.controller.reset_transient();
        self.file.current_path = None;
        self.status = "Started a new arrangement".to_owned();
        log::info!("Started a new arrangement");
    }

    /// Saves the scene to `path`.
    pub fn save_arrangement_to(&mut self, path: &Path) -> Result<()> {
        persistence::save_arrangement(&self.scene, path)?;
        self.remember_file(path);
        self.status = format!("Saved {}", path.display());
        Ok(())
    }

    /// Replaces the scene with the arrangement stored at `path`.
    ///
    /// On failure the current scene is left exactly as it was.
    pub fn load_arrangement_from(&mut self, path: &Path) -> Result<()> {
        let scene = persistence::load_arrangement(path)?;
        self.scene = scene;
        self.controller.reset_transient();
        self.remember_file(path);
        self.status = format!(
            "Loaded {} ({} polygons, {} connections)",
            path.display(),
            self.scene.nodes.len(),
            self.scene.connections.len()
        );
        Ok(())
    }

    /// Exports the canvas, at its current size, as a PNG image.
    pub fn export_png_to(&mut self, path: &Path) -> Result<()> {
        let (width, height) = self.canvas.pixel_size();
        export::export_png(&self.scene, width, height, path)?;
        self.remember_directory(path);
        self.status = format!("Exported {}", path.display());
        Ok(())
    }

    /// Exports the canvas, at its current size, as an SVG document.
    pub fn export_svg_to(&mut self, path: &Path) -> Result<()> {
        let (width, height) = self.canvas.pixel_size();
        export::export_svg(&self.scene, width, height, path)?;
        self.remember_directory(path);
        self.status = format!("Exported {}", path.display());
        Ok(())
    }

    /// Reports a failed file action through the log and a modal notice.
    pub fn finish_file_action(&mut self, title: &str, result: Result<()>) {
        if let Err(err) = result {
            log::error!("{title}: {err}");
            self.status = format!("{title}: {err}");
            self.show_notice(title, err.to_string());
        }
    }

    fn remember_file(&mut self, path: &Path) {
        self.file.current_path = Some(path.to_path_buf());
        self.remember_directory(path);
    }

    fn remember_directory(&mut self, path: &Path) {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.file.last_directory = Some(dir.to_path_buf());
        }
    }

    fn dialog(&self, title: &str, filter: &str, extension: &str) -> rfd::FileDialog {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter(filter, &[extension]);
        if let Some(dir) = &self.file.last_directory {
            dialog = dialog.set_directory(dir);
        }
        dialog
    }

    fn save_dialog(&self, title: &str, filter: &str, extension: &str) -> Option<PathBuf> {
        let default_name = self
            .file
            .current_path
            .as_ref()
            .filter(|_| extension == "json")
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("arrangement.{extension}"));
        self.dialog(title, filter, extension)
            .set_file_name(default_name)
            .save_file()
    }

    fn open_dialog(&self, title: &str, filter: &str, extension: &str) -> Option<PathBuf> {
        self.dialog(title, filter, extension).pick_file()
    }
}
