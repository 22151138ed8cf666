//! User interface for the polygon editor.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main PolygonEditorApp
//! - `canvas` - Canvas allocation and pointer event translation
//! - `rendering` - egui implementation of the drawing surface
//! - `file_ops` - New/save/load/export actions and their dialogs

mod canvas;
mod file_ops;
mod rendering;
mod state;

pub use state::{FileAction, PolygonEditorApp, APP_STATE_KEY};

use crate::constants;
use crate::controller::Mode;
use eframe::egui;

impl eframe::App for PolygonEditorApp {
    /// Persist user preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string(APP_STATE_KEY, json),
            Err(err) => log::error!("Failed to serialize app state: {err}"),
        }
    }

    /// Main update function called by eframe for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_pending_operations(ctx);
        self.show(ctx);
    }
}

impl PolygonEditorApp {
    /// Lays out the toolbar, status bar, canvas and any pending notice.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        self.draw_notice(ctx);
    }

    /// Mode buttons, side-count selector and file actions.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for mode in Mode::SELECTABLE {
                let active = self.controller.mode() == mode;
                if ui.selectable_label(active, mode.label()).clicked() {
                    let feedback = self.controller.set_mode(mode);
                    if let Some(status) = feedback.status {
                        self.status = status;
                    }
                }
            }

            ui.separator();

            ui.label("Number of Sides:");
            let mut sides = self.controller.default_sides();
            egui::ComboBox::from_id_salt("sides_selector")
                .selected_text(sides.to_string())
                .show_ui(ui, |ui| {
                    for n in constants::MIN_SIDES..=constants::MAX_SIDES {
                        ui.selectable_value(&mut sides, n, n.to_string());
                    }
                });
            if sides != self.controller.default_sides() {
                self.controller.set_default_sides(sides);
                log::info!("New polygons will have {sides} sides");
            }

            ui.separator();

            if ui.button("New").clicked() {
                self.request_file_action(FileAction::New);
            }
            if ui.button("Export as PNG").clicked() {
                self.request_file_action(FileAction::ExportPng);
            }
            if ui.button("Export as SVG").clicked() {
                self.request_file_action(FileAction::ExportSvg);
            }
            if ui.button("Save Arrangement").clicked() {
                self.request_file_action(FileAction::SaveArrangement);
            }
            if ui.button("Load Arrangement").clicked() {
                self.request_file_action(FileAction::LoadArrangement);
            }
        });
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.status.as_str());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let file = self
                    .file
                    .current_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "Untitled".to_owned());
                ui.label(file);
                ui.separator();
                ui.label(format!(
                    "Polygons: {}  Connections: {}",
                    self.scene.nodes.len(),
                    self.scene.connections.len()
                ));
            });
        });
    }

    fn draw_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

#[cfg(test)]
mod tests;
