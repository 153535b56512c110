//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting GateScene");

    gatescene_app::ShortcutRegistry::print_all();

    if let Err(err) = gatescene_app::App::run(gatescene_app::AppConfig::default()) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
