//! Leptos browser front-end.

pub mod app;
pub mod pages;
pub mod platform;
pub mod table;
pub mod toast;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(app::App);
}
