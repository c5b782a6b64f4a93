//! Toolbar Component
//!
//! Adding objectives and moving the list in and out as CSV files.

use compass::csv_codec::DEFAULT_EXPORT_FILENAME;
use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, FileReader, HtmlAnchorElement, HtmlInputElement, Url};

use crate::state::{use_app_state, AppState};

#[component]
pub fn Toolbar() -> impl IntoView {
    let state = use_app_state();

    let on_import = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Err(e) = read_csv_file(&input, state) {
            state.show_error(&format!("Import failed: {}", describe(&e)));
        }
    };

    let on_export = move |_: web_sys::MouseEvent| {
        let result = state
            .export_csv()
            .map_err(JsValue::from)
            .and_then(|text| download(&text, DEFAULT_EXPORT_FILENAME));
        match result {
            Ok(()) => state.show_success(&format!("Saved {}", DEFAULT_EXPORT_FILENAME)),
            Err(e) => state.show_error(&format!("Export failed: {}", describe(&e))),
        }
    };

    view! {
        <div class="toolbar">
            <button type="button" on:click=move |_| state.add_objective()>
                "Add objective"
            </button>
            <button type="button" on:click=on_export>
                "Export CSV"
            </button>
            <label>
                "Import CSV "
                <input type="file" accept=".csv,text/csv" on:change=on_import />
            </label>
        </div>
    }
}

/// Read the chosen file as text and import it
///
/// The input is cleared once the file is read, so picking the same file
/// again imports it again.
fn read_csv_file(input: &HtmlInputElement, state: AppState) -> Result<(), JsValue> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(());
    };

    let reader = FileReader::new()?;
    let onload = {
        let reader = reader.clone();
        let input = input.clone();
        Closure::once(move || {
            match reader.result().ok().and_then(|result| result.as_string()) {
                Some(text) => state.import_csv(&text),
                None => state.show_error("Import failed: the file is not text"),
            }
            input.set_value("");
        })
    };
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    // The reader fires once; the closure lives as long as the page
    onload.forget();

    reader.read_as_text(&file)
}

/// Offer `text` to the user as a CSV file download
fn download(text: &str, filename: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url)
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
