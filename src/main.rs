use dioxus::prelude::*;

mod components;
mod config;
mod error;
mod services;
mod storage;

use components::HomeScreen;

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("marsphotos"),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {
    // The UI runtime may install its own logger first
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[component]
fn App() -> Element {
    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",
            div { style: "flex: 1; overflow-y: auto;",
                HomeScreen {}
            }
        }
    }
}
