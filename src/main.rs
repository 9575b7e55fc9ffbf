mod aggregate;
mod api;
mod app;
mod config;
mod error;
mod format;
mod ledger;
mod router;
mod session;
mod store;

use app::{App, AppProps};
use config::AppConfig;

fn main() {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let level = config.level_filter().to_level().unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));
    if let Err(e) = loaded {
        log::warn!("{}, using defaults", e);
    }

    log::info!("starting dashboard against {}", config.api_base_url);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
