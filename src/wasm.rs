use wasm_bindgen::prelude::*;

use crate::{shell, storage};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Log everything until the stored config says otherwise.
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    let config = storage::load_config();
    log::set_max_level(config.log_level.to_level().to_level_filter());
    log::info!(
        "🌿 LeafCheck starting (endpoint {}, log level {})",
        config.endpoint,
        config.log_level.to_level()
    );

    if let Err(e) = shell::mount(config) {
        log::error!("Failed to start LeafCheck: {}", e);
    }
}
