//! # Compass
//!
//! Personal coaching objective tracker. Objectives are scored on four 0-1
//! axes (fun, achievement, ease, impact) and plotted on three scatter charts:
//!
//! - **Personal**: achievement against fun
//! - **Collective**: impact against ease
//! - **Combined**: both pairs folded through a [`projection`] function
//!
//! ## Modules
//!
//! - [`objective`]: objective model, id-keyed store, form codec, list diffing
//! - [`persistence`]: whole-list repositories (JSON file, in-memory)
//! - [`chart`]: chart configurations and the view synchronizer
//! - [`csv_codec`]: CSV import and export
//! - [`session`]: one user's objectives, storage and charts
//! - [`api`]: REST API server with Axum (`server` feature)
//! - [`websocket`]: live change feed (`server` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use compass::chart::SnapshotFactory;
//! use compass::persistence::JsonFileRepository;
//! use compass::session::{Session, SessionOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = JsonFileRepository::open("./compass_data", "objectives.json")?;
//!     let mut session = Session::open(repo, SnapshotFactory::default(), SessionOptions::default());
//!
//!     let update = session.add_objective();
//!     println!("{} objectives, saved: {}", update.frame.len(), update.saved);
//!
//!     println!("{}", session.export_csv()?);
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod csv_codec;
pub mod objective;
pub mod persistence;
pub mod projection;
pub mod session;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod websocket;

// Re-export top-level types for convenience
pub use objective::{
    Axis, Change, FormSnapshot, Objective, ObjectiveId, ObjectivePatch, ObjectiveStore,
    StoreError, StoreResult, StoredObjective,
};

pub use persistence::{
    JsonFileRepository, MemoryRepository, ObjectiveRepository, PersistenceError,
    PersistenceResult, STORAGE_KEY,
};

pub use chart::{
    ChartFactory, ChartHandle, ChartKind, Point, RenderFrame, SnapshotChart, SnapshotFactory,
    ViewSynchronizer,
};

pub use csv_codec::{CsvError, CsvImport, CsvResult, NameCommaPolicy};

pub use projection::{project, Projection};

pub use session::{ImportSummary, Session, SessionOptions, Update};

pub use config::{Config, ConfigError, LoggingConfig};

#[cfg(feature = "server")]
pub use api::{build_router, serve, ApiError, AppState};

#[cfg(feature = "server")]
pub use websocket::{websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage};
