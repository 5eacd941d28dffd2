use leptos::prelude::*;

use crate::core::config::BoardConfig;
use crate::pages::Board;

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    view! {
        <main class="app">
            <Board config=config />
        </main>
    }
}
