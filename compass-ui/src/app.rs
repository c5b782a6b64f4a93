//! App Root Component

use leptos::*;

use crate::components::{Charts, ObjectiveList, Toast, Toolbar};
use crate::state::provide_app_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_app_state();

    // The session drew before the canvases existed
    request_animation_frame(move || state.redraw());

    view! {
        <main>
            <h1>"Compass"</h1>
            <Charts />
            <Toolbar />
            <ObjectiveList />
            <Toast />
        </main>
    }
}
