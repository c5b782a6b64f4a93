//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::chart::{RenderFrame, SnapshotFactory};
use crate::config::{ApiConfig, CsvConfig};
use crate::persistence::ObjectiveRepository;
use crate::session::{Session, Update};
use crate::websocket::{ConnectionHub, HubConfig, ServerMessage};

/// Repository type the server holds: any backend that can cross threads
pub type SharedRepository = Box<dyn ObjectiveRepository + Send + Sync>;

/// The server-side session
pub type ServerSession = Session<SharedRepository, SnapshotFactory>;

/// Shared application state for all handlers
pub struct AppState {
    /// The one objective session. Every mutation holds this lock until the
    /// store is rebuilt, persisted and the charts are redrawn.
    pub session: Mutex<ServerSession>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// CSV download settings
    pub csv: Arc<CsvConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for live updates
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    /// Create a new AppState around an opened session
    pub fn new(session: ServerSession, config: ApiConfig, csv: CsvConfig) -> Self {
        Self::with_ws_config(session, config, csv, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_ws_config(
        session: ServerSession,
        config: ApiConfig,
        csv: CsvConfig,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            session: Mutex::new(session),
            config: Arc::new(config),
            csv: Arc::new(csv),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }

    /// What the charts show right now
    pub async fn current_frame(&self) -> RenderFrame {
        let mut session = self.session.lock().await;
        match session.view().last_frame() {
            Some(frame) => frame.clone(),
            None => session.render(),
        }
    }

    /// Tell every WebSocket client about an update
    ///
    /// Call while still holding the session lock, so clients receive updates
    /// in commit order.
    pub async fn announce(&self, update: &Update) {
        self.ws_hub
            .broadcast_all(ServerMessage::for_update(update))
            .await;
    }
}
