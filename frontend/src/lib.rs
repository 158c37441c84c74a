pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger already set: {}", err).into());
    }
    log::info!("Starting Happy Pets frontend (wasm)");

    // Runtime config (env.js globals, then ./config.json) must be settled
    // before the session store derives the media origin from it.
    leptos::spawn_local(async move {
        config::init().await;
        log::debug!("Runtime config initialized: {}", config::api_base_url());
        router::mount_app();
    });
}
