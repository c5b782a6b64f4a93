//! Application State
//!
//! One objective session shared by all components, plus the signals the
//! views render from.

pub mod storage;

use compass::objective::{FormSnapshot, ObjectiveId, StoreError, StoredObjective};
use compass::session::{Session, SessionOptions, Update};
use leptos::*;

use crate::components::chart::CanvasFactory;
use storage::LocalStorageRepository;

const UNSAVED: &str = "Could not save to local storage; changes will be lost on reload";

pub type UiSession = Session<LocalStorageRepository, CanvasFactory>;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct AppState {
    /// The objective session. Handlers mutate it synchronously; nothing else
    /// runs in between.
    session: StoredValue<UiSession>,
    /// Objectives in display order, as last committed
    pub rows: RwSignal<Vec<StoredObjective>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Open the session from local storage and provide state to the component tree
pub fn provide_app_state() -> AppState {
    let session = Session::open(
        LocalStorageRepository::default(),
        CanvasFactory,
        SessionOptions::default(),
    );
    let rows = create_rw_signal(session.entries());

    let state = AppState {
        session: store_value(session),
        rows,
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state
}

pub fn use_app_state() -> AppState {
    match use_context::<AppState>() {
        Some(state) => state,
        None => wasm_bindgen::throw_str("AppState not provided"),
    }
}

impl AppState {
    /// Run one mutation and publish its result to the views
    fn commit(&self, mutate: impl FnOnce(&mut UiSession) -> Update) -> Option<Update> {
        let update = self.session.try_update_value(mutate)?;
        self.publish(&update);
        Some(update)
    }

    fn publish(&self, update: &Update) {
        if !update.saved {
            self.show_error(UNSAVED);
        }
        self.rows.set(self.session.with_value(|session| session.entries()));
    }

    /// Append a default objective
    pub fn add_objective(&self) {
        self.commit(|session| session.add_objective());
    }

    /// Delete one objective
    ///
    /// Rows may show names typed since the last commit, so only the id is
    /// trusted here.
    pub fn remove_objective(&self, id: ObjectiveId) {
        match self.session.try_update_value(|session| session.remove(id)) {
            Some(Ok(update)) => self.publish(&update),
            Some(Err(e)) => self.show_error(&removal_failed(&e)),
            None => {}
        }
    }

    /// Rebuild the list from the form's current fields
    ///
    /// Only the stored session changes: the form already shows what was
    /// typed, so the row signal is left alone.
    pub fn apply_form(&self, snapshot: &FormSnapshot) {
        let saved = self
            .session
            .try_update_value(|session| session.apply_form(snapshot).saved)
            .unwrap_or(false);

        if !saved {
            self.show_error(UNSAVED);
        }
    }

    /// Replace every objective with the contents of a CSV file
    pub fn import_csv(&self, text: &str) {
        let mut summary = None;
        self.commit(|session| {
            let (s, update) = session.import_csv(text);
            summary = Some(s);
            update
        });

        if let Some(summary) = summary {
            let mut message = format!("Imported {} objectives", summary.imported);
            if summary.rows_skipped > 0 {
                message.push_str(&format!(", skipped {} unreadable rows", summary.rows_skipped));
            }
            if !summary.missing_columns.is_empty() {
                message.push_str(&format!(
                    " (missing columns read as 0: {})",
                    summary.missing_columns.join(", ")
                ));
            }
            self.show_success(&message);
        }
    }

    /// The current list as CSV text
    pub fn export_csv(&self) -> Result<String, String> {
        self.session
            .with_value(|session| session.export_csv())
            .map_err(|e| e.to_string())
    }

    /// Redraw all charts without changing anything
    pub fn redraw(&self) {
        self.session.update_value(|session| {
            session.render();
        });
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

fn removal_failed(error: &StoreError) -> String {
    format!("Could not delete: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_failed_names_the_id() {
        let message = removal_failed(&StoreError::NotFound(ObjectiveId(3)));

        assert_eq!(message, "Could not delete: Objective not found: 3");
    }
}
