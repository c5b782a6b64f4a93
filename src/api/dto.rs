//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::chart::{RenderFrame, SnapshotChart};
use crate::objective::{Change, ObjectiveId, StoredObjective};
use crate::session::{ImportSummary, Update};

// ============================================
// OBJECTIVE DTOs
// ============================================

/// List of all objectives in display order
#[derive(Debug, Serialize, Deserialize)]
pub struct ObjectiveListResponse {
    pub total: usize,
    pub objectives: Vec<StoredObjective>,
}

impl ObjectiveListResponse {
    pub fn new(objectives: Vec<StoredObjective>) -> Self {
        Self {
            total: objectives.len(),
            objectives,
        }
    }
}

/// Move request: new display position for one objective
#[derive(Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: usize,
}

/// Result of any mutation
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// Whether the new list reached storage
    pub saved: bool,
    /// Id of the objective this request created, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<ObjectiveId>,
    /// Id-keyed diff against the list before the request
    pub changes: Vec<Change>,
    /// The whole list after the request
    pub objectives: Vec<StoredObjective>,
}

impl MutationResponse {
    pub fn new(update: &Update, objectives: Vec<StoredObjective>) -> Self {
        Self {
            saved: update.saved,
            created: update.created_id(),
            changes: update.changes.clone(),
            objectives,
        }
    }
}

// ============================================
// CHART DTOs
// ============================================

/// All three chart configurations plus the frame they were drawn from
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    /// Combined chart formula
    pub projection: String,
    pub frame: RenderFrame,
    pub charts: Vec<SnapshotChart>,
}

// ============================================
// TRANSFER DTOs
// ============================================

/// CSV import result
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub rows_skipped: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_columns: Vec<String>,
    pub saved: bool,
    pub objectives: Vec<StoredObjective>,
}

impl ImportResponse {
    pub fn new(summary: ImportSummary, update: &Update, objectives: Vec<StoredObjective>) -> Self {
        Self {
            imported: summary.imported,
            rows_skipped: summary.rows_skipped,
            missing_columns: summary.missing_columns,
            saved: update.saved,
            objectives,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Storage status: ok or error
    pub storage: String,
    /// Number of objectives in the session
    pub objectives: usize,
    /// Open WebSocket connections
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
