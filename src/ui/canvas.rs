//! Canvas interaction.
//!
//! Raw egui input is translated into toolkit-neutral [`PointerEvent`]s in canvas
//! coordinates and fed to the interaction controller.

use super::state::PolygonEditorApp;
use crate::controller::{PointerButton, PointerEvent};
use crate::geometry::Point;
use eframe::egui;

/// Converts a screen position to whole-pixel canvas coordinates.
pub fn screen_to_canvas(canvas_rect: egui::Rect, screen_pos: egui::Pos2) -> Point {
    let local = screen_pos - canvas_rect.min;
    Point::new(local.x.round() as i32, local.y.round() as i32)
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Extracts the pointer events relevant to the canvas from one frame's input.
///
/// Presses only count when they land on the canvas and `on_canvas_layer` accepts
/// their position. Moves and releases are always forwarded so a drag keeps working
/// when the pointer leaves the canvas.
pub fn pointer_events(
    events: &[egui::Event],
    canvas_rect: egui::Rect,
    on_canvas_layer: impl Fn(egui::Pos2) -> bool,
) -> Vec<PointerEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::PointerMoved(pos) => Some(PointerEvent::Moved {
                pos: screen_to_canvas(canvas_rect, *pos),
            }),
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                ..
            } if canvas_rect.contains(*pos) && on_canvas_layer(*pos) => {
                Some(PointerEvent::Pressed {
                    pos: screen_to_canvas(canvas_rect, *pos),
                    button: map_button(*button)?,
                })
            }
            egui::Event::PointerButton {
                pos,
                button,
                pressed: false,
                ..
            } => Some(PointerEvent::Released {
                pos: screen_to_canvas(canvas_rect, *pos),
                button: map_button(*button)?,
            }),
            _ => None,
        })
        .collect()
}

impl PolygonEditorApp {
    /// Allocates the canvas, applies this frame's pointer input and paints the scene.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;
        self.canvas.rect = canvas_rect;

        // A modal notice blocks editing until dismissed. Input is consumed on the
        // first pass only; a discarded pass replays the same events.
        if self.notice.is_none() && ui.ctx().current_pass_index() == 0 {
            let events = ui.input(|i| i.events.clone());
            let canvas_layer = ui.layer_id();
            // Popups and windows above the canvas own the clicks that land on them.
            let on_canvas_layer = |pos: egui::Pos2| {
                ui.ctx()
                    .layer_id_at(pos)
                    .is_none_or(|layer| layer == canvas_layer)
            };
            for event in pointer_events(&events, canvas_rect, on_canvas_layer) {
                self.dispatch_pointer_event(ui.ctx(), event);
            }
        }

        self.render_scene_elements(&painter, canvas_rect);
    }

    /// Hands one pointer event to the controller and applies its feedback.
    pub fn dispatch_pointer_event(&mut self, ctx: &egui::Context, event: PointerEvent) {
        let feedback = self.controller.handle(&mut self.scene, event);
        if let Some(status) = feedback.status {
            self.status = status;
        }
        if feedback.repaint {
            ctx.request_repaint();
        }
    }
}
