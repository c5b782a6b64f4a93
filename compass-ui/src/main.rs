//! Compass Front End
//!
//! Objective tracker built with Leptos (WASM).
//!
//! # Features
//!
//! - Editable objective list, one row per objective
//! - Personal, Collective and Combined scatter charts on canvas
//! - Local storage persistence
//! - CSV import and export
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All state lives in the browser: one `compass::Session` backed
//! by local storage and drawing onto canvas charts.

use leptos::*;
use wasm_bindgen::JsCast;

mod app;
mod components;
mod state;

/// Id of the element the app mounts into
const MOUNT_ID: &str = "compass";

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match root {
        Some(root) => mount_to(root, || view! { <app::App /> }),
        None => wasm_bindgen::throw_str(&format!(
            "Compass cannot start: no element with id \"{}\" in the page",
            MOUNT_ID
        )),
    }
}
