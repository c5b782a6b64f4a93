//! Toast Notifications
//!
//! Import results and storage failures. Each message clears itself after a
//! timeout, or earlier when dismissed.

use leptos::*;

use crate::state::use_app_state;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tone {
    Success,
    Error,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Tone::Success => "toast success",
            Tone::Error => "toast error",
        }
    }

    /// Errors interrupt screen readers; successes wait their turn
    fn live(self) -> &'static str {
        match self {
            Tone::Success => "polite",
            Tone::Error => "assertive",
        }
    }
}

/// Both toast slots, stacked in the page corner
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="toasts">
            <ToastSlot message=state.success tone=Tone::Success />
            <ToastSlot message=state.error tone=Tone::Error />
        </div>
    }
}

#[component]
fn ToastSlot(message: RwSignal<Option<String>>, tone: Tone) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class=tone.class() aria-live=tone.live()>
                {move || message.get().unwrap_or_default()}
                " "
                <button type="button" title="Dismiss" on:click=move |_| message.set(None)>
                    "×"
                </button>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_announced_first() {
        assert_eq!(Tone::Error.live(), "assertive");
        assert_eq!(Tone::Success.live(), "polite");
        assert_ne!(Tone::Error.class(), Tone::Success.class());
    }
}
