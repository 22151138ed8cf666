use super::*;
use crate::error::ArrangementError;
use crate::geometry::Point;
use crate::types::{Connection, PolygonNode};
use std::path::PathBuf;

fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

/// Runs one headless frame that draws only the canvas.
fn run_canvas_frame(ctx: &egui::Context, app: &mut PolygonEditorApp, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

/// Like [`run_canvas_frame`], with a popup-style area covering `cover` on top.
fn run_covered_canvas_frame(
    ctx: &egui::Context,
    app: &mut PolygonEditorApp,
    cover: egui::Rect,
    events: Vec<egui::Event>,
) {
    let _ = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
        egui::Area::new(egui::Id::new("covering_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(cover.min)
            .show(ctx, |ui| {
                ui.allocate_exact_size(cover.size(), egui::Sense::click());
            });
    });
}

fn press_at(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

fn release_at(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed: false,
        modifiers: egui::Modifiers::NONE,
    }]
}

fn temp_path(ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("polygon_editor_ui_{}.{ext}", uuid::Uuid::new_v4()))
}

#[test]
fn clicking_canvas_in_create_mode_adds_polygon() {
    let mut app = PolygonEditorApp::default();
    app.controller.set_mode(Mode::Create);
    app.controller.set_default_sides(7);
    let ctx = egui::Context::default();

    // First frame establishes the canvas rectangle.
    run_canvas_frame(&ctx, &mut app, Vec::new());
    let origin = app.canvas.rect.min;

    run_canvas_frame(&ctx, &mut app, press_at(origin + egui::vec2(100.0, 120.0)));

    assert_eq!(
        app.scene.nodes,
        vec![PolygonNode::new(Point::new(100, 120), 30, 7)]
    );
}

#[test]
fn clicking_canvas_without_mode_does_nothing() {
    let mut app = PolygonEditorApp::default();
    let ctx = egui::Context::default();
    run_canvas_frame(&ctx, &mut app, Vec::new());
    let origin = app.canvas.rect.min;
    run_canvas_frame(&ctx, &mut app, press_at(origin + egui::vec2(50.0, 50.0)));
    assert!(app.scene.is_empty());
}

#[test]
fn dragging_in_move_mode_moves_polygon_by_pointer_delta() {
    let mut app = PolygonEditorApp::default();
    app.scene.add_node(Point::new(200, 150), 30, 5);
    app.controller.set_mode(Mode::Move);
    let ctx = egui::Context::default();

    run_canvas_frame(&ctx, &mut app, Vec::new());
    let origin = app.canvas.rect.min;

    // Grab off-center; the grab offset must be preserved.
    let grab = origin + egui::vec2(210.0, 145.0);
    run_canvas_frame(&ctx, &mut app, press_at(grab));
    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(grab + egui::vec2(40.0, 25.0))],
    );
    run_canvas_frame(&ctx, &mut app, release_at(grab + egui::vec2(40.0, 25.0)));

    assert_eq!(app.scene.nodes[0].center, Point::new(240, 175));
    assert_eq!(app.controller.drag(), None);
}

#[test]
fn open_notice_blocks_canvas_input() {
    let mut app = PolygonEditorApp::default();
    app.controller.set_mode(Mode::Create);
    app.show_notice("Load failed", "bad file");
    let ctx = egui::Context::default();
    run_canvas_frame(&ctx, &mut app, Vec::new());
    let origin = app.canvas.rect.min;
    run_canvas_frame(&ctx, &mut app, press_at(origin + egui::vec2(100.0, 100.0)));
    assert!(app.scene.nodes.is_empty());
}

#[test]
fn clicks_on_a_popup_over_the_canvas_do_not_reach_it() {
    let mut app = PolygonEditorApp::default();
    app.scene.add_node(Point::new(300, 300), 30, 5);
    app.controller.set_mode(Mode::Create);
    let ctx = egui::Context::default();
    let cover = egui::Rect::from_min_size(egui::pos2(100.0, 100.0), egui::vec2(300.0, 300.0));

    // Let the area settle so it is visible and registered for hit testing.
    for _ in 0..3 {
        run_covered_canvas_frame(&ctx, &mut app, cover, Vec::new());
    }
    assert_eq!(
        ctx.layer_id_at(egui::pos2(200.0, 200.0)).map(|layer| layer.order),
        Some(egui::Order::Foreground)
    );

    run_covered_canvas_frame(&ctx, &mut app, cover, press_at(egui::pos2(200.0, 200.0)));
    run_covered_canvas_frame(&ctx, &mut app, cover, release_at(egui::pos2(200.0, 200.0)));
    assert_eq!(app.scene.nodes.len(), 1);

    // The same click beside the popup still creates a polygon.
    run_covered_canvas_frame(&ctx, &mut app, cover, press_at(egui::pos2(600.0, 500.0)));
    run_covered_canvas_frame(&ctx, &mut app, cover, release_at(egui::pos2(600.0, 500.0)));
    assert_eq!(app.scene.nodes.len(), 2);

    // Delete mode ignores the popup too.
    app.controller.set_mode(Mode::Delete);
    let over_node = app.canvas.rect.min + egui::vec2(300.0, 300.0);
    run_covered_canvas_frame(&ctx, &mut app, cover, press_at(over_node));
    assert_eq!(app.scene.nodes.len(), 2);
}

#[test]
fn full_layout_renders_without_file_actions() {
    let mut app = PolygonEditorApp::default();
    app.scene.add_node(Point::new(100, 100), 30, 5);
    app.scene.add_node(Point::new(300, 100), 30, 5);
    app.scene.add_connection(0, 1);
    let ctx = egui::Context::default();
    let output = ctx.run(raw_input(Vec::new()), |ctx| app.show(ctx));
    assert!(!output.shapes.is_empty());
    let (w, h) = app.canvas.pixel_size();
    assert!(w > 0 && h > 0);
}

#[test]
fn save_and_load_round_trip_through_app() {
    let path = temp_path("json");
    let mut app = PolygonEditorApp::default();
    app.scene.add_node(Point::new(100, 100), 30, 4);
    app.scene.add_node(Point::new(200, 100), 30, 4);
    app.scene.add_connection(1, 0);
    app.save_arrangement_to(&path).expect("save");
    assert_eq!(app.file.current_path.as_deref(), Some(path.as_path()));

    let mut other = PolygonEditorApp::default();
    other.scene.add_node(Point::new(5, 5), 10, 3);
    other.load_arrangement_from(&path).expect("load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(other.scene, app.scene);
    assert_eq!(other.scene.connections, vec![Connection::new(1, 0)]);
}

#[test]
fn failed_load_keeps_scene_and_shows_notice() {
    let path = temp_path("json");
    std::fs::write(
        &path,
        r#"{"nodes": [[{"x": 1, "y": 2}, 30, 5]], "connections": [[0, 3]]}"#,
    )
    .expect("write fixture");

    let mut app = PolygonEditorApp::default();
    app.scene.add_node(Point::new(100, 100), 30, 5);
    app.scene.add_node(Point::new(200, 100), 30, 5);
    app.scene.add_connection(0, 1);
    let before = app.scene.clone();

    let result = app.load_arrangement_from(&path);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(result, Err(ArrangementError::InvalidFile(_))));
    assert_eq!(app.scene, before);
    assert_eq!(app.file.current_path, None);

    app.finish_file_action("Load failed", result);
    let notice = app.notice.as_ref().expect("notice shown");
    assert_eq!(notice.title, "Load failed");
    assert!(notice.message.contains("invalid arrangement file"));
}

#[test]
fn load_clears_pending_connection() {
    let path = temp_path("json");
    std::fs::write(
        &path,
        r#"{"nodes": [[{"x": 100, "y": 100}, 30, 5]], "connections": []}"#,
    )
    .expect("write fixture");

    let mut app = PolygonEditorApp::default();
    app.scene.add_node(Point::new(100, 100), 30, 5);
    app.controller.set_mode(Mode::Connect);
    let ctx = egui::Context::default();
    app.dispatch_pointer_event(
        &ctx,
        crate::controller::PointerEvent::Pressed {
            pos: Point::new(100, 100),
            button: crate::controller::PointerButton::Primary,
        },
    );
    assert_eq!(app.controller.connection_start(), Some(0));

    app.load_arrangement_from(&path).expect("load");
    let _ = std::fs::remove_file(&path);
    assert_eq!(app.controller.connection_start(), None);
    assert_eq!(app.controller.mode(), Mode::Connect);
}

#[test]
fn export_png_uses_canvas_size() {
    let path = temp_path("png");
    let mut app = PolygonEditorApp::default();
    app.canvas.rect = egui::Rect::from_min_size(egui::pos2(0.0, 30.0), egui::vec2(640.0, 480.0));
    app.scene.add_node(Point::new(100, 100), 30, 5);
    app.export_png_to(&path).expect("export");

    let image = tiny_skia::Pixmap::load_png(&path).expect("decode");
    let _ = std::fs::remove_file(&path);
    assert_eq!((image.width(), image.height()), (640, 480));
}

#[test]
fn new_arrangement_clears_scene() {
    let mut app = PolygonEditorApp::default();
    app.scene.add_node(Point::new(1, 1), 30, 5);
    app.file.current_path = Some(PathBuf::from("old.json"));
    app.request_file_action(FileAction::New);
    let ctx = egui::Context::default();
    app.handle_pending_operations(&ctx);
    assert!(app.scene.is_empty());
    assert_eq!(app.file.current_path, None);
    assert_eq!(app.file.pending_action, None);
}

#[test]
fn preferences_survive_serialization_but_scene_does_not() {
    let mut app = PolygonEditorApp::default();
    app.controller.set_default_sides(9);
    app.controller.set_mode(Mode::Delete);
    app.file.last_directory = Some(PathBuf::from("/tmp/arrangements"));
    app.scene.add_node(Point::new(1, 1), 30, 5);

    let json = app.to_json().expect("serialize app");
    let restored = PolygonEditorApp::from_json(&json).expect("deserialize app");

    assert_eq!(restored.controller.default_sides(), 9);
    assert_eq!(restored.controller.default_radius(), 30);
    assert_eq!(restored.controller.mode(), Mode::None);
    assert_eq!(
        restored.file.last_directory,
        Some(PathBuf::from("/tmp/arrangements"))
    );
    assert!(restored.scene.is_empty());
}

#[test]
fn restored_preferences_clamp_side_count() {
    let app = PolygonEditorApp::from_json(r#"{"controller":{"default_sides":0}}"#)
        .expect("deserialize app");
    assert_eq!(app.controller.default_sides(), 3);

    let app = PolygonEditorApp::from_json(r#"{"controller":{"default_sides":500}}"#)
        .expect("deserialize app");
    assert_eq!(app.controller.default_sides(), 20);
}

#[test]
fn missing_storage_falls_back_to_defaults() {
    let app = PolygonEditorApp::from_storage(None);
    assert_eq!(app.controller.default_sides(), 5);
    assert!(app.notice.is_none());
}
