use leptos::prelude::*;
use task_board::core::config::BoardConfig;
use task_board::core::services::BrowserStorage;
use task_board::{logging, App};

fn main() {
    console_error_panic_hook::set_once();

    let config = BoardConfig::load(&BrowserStorage);
    logging::init(&config);
    tracing::info!(storage_key = %config.storage_key, "starting task board");

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
