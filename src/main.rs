fn main() -> Result<(), eframe::Error> {
    // Diagnostics go through `log`; filter with RUST_LOG (e.g. RUST_LOG=info)
    env_logger::init();

    polygon_editor::run_app()
}
