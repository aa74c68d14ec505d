use dioxus::launch;
use dioxus::prelude::*;
use dioxus_logger::tracing::{info, Level};

use molt_console::{config, Route};

fn main() {
    // Initialize logging for WASM
    wasm_logger::init(wasm_logger::Config::default());
    dioxus_logger::init(Level::INFO).ok();

    info!("MOLT service at '{}'", config().api_base);
    launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}
