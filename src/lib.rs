pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod controllers;
pub mod dom;
pub mod error;
pub mod form;
pub mod models;
pub mod render;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;

    console_error_panic_hook::set_once();
    leptos::mount_to_body(App);
}
