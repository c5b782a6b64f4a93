//! Objective List Component
//!
//! One form row per objective. Every edit re-reads the whole form and
//! rebuilds the list from it.

use compass::objective::form::field_name;
use compass::objective::{FormField, FormSnapshot, StoredObjective};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement};

use crate::state::use_app_state;

/// Editable objective rows
#[component]
pub fn ObjectiveList() -> impl IntoView {
    let state = use_app_state();

    let on_input = move |ev: web_sys::Event| {
        let form = ev
            .current_target()
            .and_then(|target| target.dyn_into::<HtmlFormElement>().ok());
        let Some(form) = form else {
            return;
        };

        match read_form(&form) {
            Some(snapshot) => state.apply_form(&snapshot),
            None => state.show_error("Could not read the objective form"),
        }
    };

    // Rows are keyed by position too, so inputs are rebuilt with their new
    // field names whenever an objective changes position.
    let rows = move || {
        state
            .rows
            .get()
            .into_iter()
            .enumerate()
            .collect::<Vec<_>>()
    };

    view! {
        <form class="objectives" on:input=on_input on:submit=|ev| ev.prevent_default()>
            <For
                each=rows
                key=|(index, row)| (row.id, *index)
                children=move |(index, row)| view! { <ObjectiveRow index=index row=row /> }
            />
        </form>
    }
}

#[component]
fn ObjectiveRow(index: usize, row: StoredObjective) -> impl IntoView {
    let state = use_app_state();
    let id = row.id;

    let inputs = FormField::all()
        .into_iter()
        .map(|field| {
            let name = field_name(field, index);
            match field {
                FormField::Name => view! {
                    <input
                        type="text"
                        name=name
                        value=row.objective.name.clone()
                        placeholder="Objective"
                        aria-label="name"
                    />
                }
                .into_view(),
                FormField::Axis(axis) => view! {
                    <label>
                        {axis.as_str()}
                        " "
                        <input
                            type="number"
                            name=name
                            min="0"
                            max="1"
                            step="0.1"
                            value=row.objective.axis(axis).to_string()
                        />
                    </label>
                }
                .into_view(),
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="objective-row">
            {inputs}
            <button
                type="button"
                title="Delete this objective"
                on:click=move |_| state.remove_objective(id)
            >
                "Delete"
            </button>
        </div>
    }
}

/// Collect the form's text fields into a snapshot
fn read_form(form: &HtmlFormElement) -> Option<FormSnapshot> {
    let data = FormData::new_with_form(form).ok()?;
    let entries = js_sys::try_iter(&data).ok()??;

    let mut snapshot = FormSnapshot::new();
    for entry in entries {
        let pair: js_sys::Array = entry.ok()?.dyn_into().ok()?;
        let key = pair.get(0).as_string()?;
        // File fields are not text; an objective form has none
        if let Some(value) = pair.get(1).as_string() {
            snapshot.push(key, value);
        }
    }
    Some(snapshot)
}
