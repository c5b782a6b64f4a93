//! Objectives
//!
//! The objective model and everything that mutates it:
//!
//! - **types**: `Objective`, `Axis`, `ObjectiveId`, `ObjectivePatch`
//! - **store**: ordered, id-keyed `ObjectiveStore`
//! - **form**: the `{field}{index}` form codec and full form rebuild
//! - **reconcile**: id-based diff between two store snapshots

mod error;
pub mod form;
pub mod reconcile;
mod store;
mod types;

pub use error::{StoreError, StoreResult};
pub use form::{load_from_form, parse_field_key, FieldKey, FormField, FormSnapshot};
pub use reconcile::{diff, Change};
pub use store::{ObjectiveStore, StoredObjective};
pub use types::{
    clamp_unit, parse_objective_number, Axis, Objective, ObjectiveId, ObjectivePatch,
    DEFAULT_AXIS_VALUE,
};
