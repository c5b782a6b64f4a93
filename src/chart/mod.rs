//! Charts
//!
//! The three scatter views over the objective set and the synchronizer that
//! keeps them current.
//!
//! | Chart      | x                       | y                              |
//! |------------|-------------------------|--------------------------------|
//! | Personal   | achievement             | fun                            |
//! | Collective | impact                  | ease                           |
//! | Combined   | project(impact, ease)   | project(achievement, fun)      |
//!
//! Rendering itself belongs to a [`ChartFactory`] implementation: the server
//! uses [`SnapshotFactory`], the WASM front end draws on canvas.

mod snapshot;
mod sync;
mod types;

pub use snapshot::{SnapshotChart, SnapshotFactory};
pub use sync::{ChartFactory, ChartHandle, RenderFrame, ViewSynchronizer};
pub use types::{
    ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, Label, Point, Scale, Scales,
    POINT_RADIUS,
};
