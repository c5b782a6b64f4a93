//! Session
//!
//! The application-state object: one objective store, the repository it
//! persists to and the synchronizer that keeps the charts current. Every
//! mutation runs the same pipeline to completion before returning:
//!
//! ```text
//! mutate store -> persist (best effort) -> render charts -> diff
//! ```
//!
//! The front end calls into a session from its event handlers; the server
//! keeps one behind a mutex.

use serde::Serialize;

use crate::chart::{ChartFactory, RenderFrame, ViewSynchronizer};
use crate::csv_codec::{self, CsvResult, NameCommaPolicy};
use crate::objective::{
    diff, load_from_form, Change, FormSnapshot, Objective, ObjectiveId, ObjectivePatch,
    ObjectiveStore, StoreResult, StoredObjective,
};
use crate::persistence::ObjectiveRepository;
use crate::projection::Projection;

/// Behaviour switches for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub projection: Projection,
    pub name_commas: NameCommaPolicy,
}

/// Result of one mutation pass
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Update {
    /// Operations a keyed view must apply
    pub changes: Vec<Change>,
    /// What the charts now show
    pub frame: RenderFrame,
    /// Whether the new list reached the repository
    pub saved: bool,
}

impl Update {
    /// Id of the first objective created by this update
    pub fn created_id(&self) -> Option<ObjectiveId> {
        self.changes.iter().find_map(|c| match c {
            Change::Created { id, .. } => Some(*id),
            _ => None,
        })
    }
}

/// Counts reported after a CSV import
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub rows_skipped: usize,
    pub missing_columns: Vec<String>,
}

/// One user's objectives, their storage and their charts
pub struct Session<R, F>
where
    R: ObjectiveRepository,
    F: ChartFactory,
{
    store: ObjectiveStore,
    repository: R,
    view: ViewSynchronizer<F>,
    options: SessionOptions,
}

impl<R, F> Session<R, F>
where
    R: ObjectiveRepository,
    F: ChartFactory,
{
    /// Load the stored list and draw it
    ///
    /// Load failures yield an empty list. An empty list gets one default
    /// objective, which is persisted right away.
    pub fn open(repository: R, factory: F, options: SessionOptions) -> Self {
        let objectives = ObjectiveStore::load_from_persistence(&repository);
        let loaded = objectives.len();

        let mut session = Self {
            store: ObjectiveStore::from_objectives(objectives),
            repository,
            view: ViewSynchronizer::new(factory, options.projection),
            options,
        };

        if session.store.ensure_not_empty().is_some() {
            session.save();
        }
        session.view.render(&session.store.objectives());

        tracing::info!(
            loaded,
            objectives = session.store.len(),
            projection = %options.projection,
            "Session opened"
        );
        session
    }

    pub fn store(&self) -> &ObjectiveStore {
        &self.store
    }

    pub fn view(&self) -> &ViewSynchronizer<F> {
        &self.view
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Objectives with ids in display order
    pub fn entries(&self) -> Vec<StoredObjective> {
        self.store.entries()
    }

    /// Form entries for the current list
    pub fn form_snapshot(&self) -> FormSnapshot {
        FormSnapshot::from_objectives(&self.store.objectives())
    }

    fn save(&self) -> bool {
        match self.store.persist(&self.repository) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist objectives");
                false
            }
        }
    }

    fn commit(&mut self, previous: Vec<StoredObjective>) -> Update {
        let saved = self.save();
        let frame = self.view.render(&self.store.objectives());
        let changes = diff(&previous, &self.store.entries());
        tracing::debug!(changes = changes.len(), saved, "Committed update");
        Update {
            changes,
            frame,
            saved,
        }
    }

    /// Redraw without changing anything
    pub fn render(&mut self) -> RenderFrame {
        self.view.render(&self.store.objectives())
    }

    /// Append a default objective
    pub fn add_objective(&mut self) -> Update {
        let previous = self.store.entries();
        let id = self.store.add_default();
        tracing::debug!(%id, "Added objective");
        self.commit(previous)
    }

    /// Append an objective with explicit values (axes clamped into [0, 1])
    pub fn add(&mut self, patch: &ObjectivePatch) -> Update {
        let previous = self.store.entries();
        let mut objective = Objective::new_default(self.store.len());
        objective.apply(patch);
        self.store.push(objective);
        self.commit(previous)
    }

    /// Change fields of one objective
    pub fn update(&mut self, id: ObjectiveId, patch: &ObjectivePatch) -> StoreResult<Update> {
        let previous = self.store.entries();
        self.store.update(id, patch)?;
        Ok(self.commit(previous))
    }

    /// Delete one objective by id
    pub fn remove(&mut self, id: ObjectiveId) -> StoreResult<Update> {
        let previous = self.store.entries();
        self.store.remove(id)?;
        Ok(self.commit(previous))
    }

    /// Delete the objective at a display position
    pub fn remove_at(&mut self, index: usize) -> StoreResult<Update> {
        let previous = self.store.entries();
        self.store.remove_at(index)?;
        Ok(self.commit(previous))
    }

    /// Move one objective to another display position
    pub fn move_to(&mut self, id: ObjectiveId, index: usize) -> StoreResult<Update> {
        let previous = self.store.entries();
        self.store.move_to(id, index)?;
        Ok(self.commit(previous))
    }

    /// Rebuild the whole list from the form
    ///
    /// Positions that existed before keep their ids.
    pub fn apply_form(&mut self, snapshot: &FormSnapshot) -> Update {
        let previous = self.store.entries();
        self.store.replace_from_form(load_from_form(snapshot));
        self.commit(previous)
    }

    /// Replace the whole list with the contents of a CSV file
    ///
    /// An import that yields nothing leaves one default objective.
    pub fn import_csv(&mut self, text: &str) -> (ImportSummary, Update) {
        let import = csv_codec::import_csv(text);
        let summary = ImportSummary {
            imported: import.objectives.len(),
            rows_skipped: import.rows_skipped,
            missing_columns: import.missing_columns,
        };

        let previous = self.store.entries();
        self.store.replace_all(import.objectives);
        self.store.ensure_not_empty();

        tracing::info!(
            imported = summary.imported,
            skipped = summary.rows_skipped,
            "Imported objectives from CSV"
        );
        (summary, self.commit(previous))
    }

    /// Serialize the current list to CSV text
    pub fn export_csv(&self) -> CsvResult<String> {
        csv_codec::export_csv(&self.store.objectives(), self.options.name_commas)
    }

    /// Drop every objective and start over with one default
    pub fn reset(&mut self) -> Update {
        let previous = self.store.entries();
        self.store.replace_all(Vec::new());
        self.store.ensure_not_empty();
        self.commit(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, Point, SnapshotFactory};
    use crate::objective::{Axis, StoreError};
    use crate::persistence::MemoryRepository;

    type TestSession = Session<MemoryRepository, SnapshotFactory>;

    fn open(repo: MemoryRepository) -> TestSession {
        Session::open(repo, SnapshotFactory::default(), SessionOptions::default())
    }

    fn names(session: &TestSession) -> Vec<String> {
        session.entries().into_iter().map(|e| e.objective.name).collect()
    }

    #[test]
    fn test_open_corrupt_storage_creates_one_default() {
        let session = open(MemoryRepository::with_raw("{{{ not json"));

        assert_eq!(names(&session), vec!["Objective 0"]);
        // The default replaced the corrupt data
        assert_eq!(
            session.repository().load().unwrap(),
            vec![Objective::new_default(0)]
        );
        assert!(session.view().is_initialized());
    }

    #[test]
    fn test_open_existing_list() {
        let repo = MemoryRepository::new();
        repo.save(&[Objective::new("A", 0.2, 0.8, 0.5, 0.5)]).unwrap();

        let session = open(repo);

        assert_eq!(names(&session), vec!["A"]);
        let frame = session.view().last_frame().unwrap();
        assert_eq!(frame.personal, vec![Point::new(0.8, 0.2)]);
    }

    #[test]
    fn test_add_persists_and_renders() {
        let mut session = open(MemoryRepository::new());

        let update = session.add_objective();

        assert!(update.saved);
        assert_eq!(update.frame.labels, vec!["Objective 0", "Objective 1"]);
        assert_eq!(update.changes.len(), 1);
        assert!(update.created_id().is_some());
        assert_eq!(session.repository().load().unwrap().len(), 2);
    }

    #[test]
    fn test_add_with_values() {
        let mut session = open(MemoryRepository::new());

        let patch = ObjectivePatch::default()
            .name("Run")
            .with_axis(Axis::Fun, 0.9);
        let update = session.add(&patch);

        let id = update.created_id().unwrap();
        let objective = session.store().get(id).unwrap();
        assert_eq!(objective.name, "Run");
        assert_eq!(objective.fun, 0.9);
        assert_eq!(objective.ease, 0.5);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let mut session = open(MemoryRepository::new().reject_writes());

        let update = session.add_objective();

        assert!(!update.saved);
        assert_eq!(session.store().len(), 2);
        assert_eq!(update.frame.len(), 2);
    }

    #[test]
    fn test_remove_at_renumbers_form() {
        let mut session = open(MemoryRepository::new());
        session.add_objective();
        session.add_objective();
        let removed = session.store().ids()[1];

        let update = session.remove_at(1).unwrap();

        assert_eq!(update.changes, vec![Change::Removed { id: removed }]);
        assert_eq!(names(&session), vec!["Objective 0", "Objective 2"]);
        let form = session.form_snapshot();
        assert_eq!(form.entries()[5].0, "name1");
        assert_eq!(form.entries()[5].1, "Objective 2");
    }

    #[test]
    fn test_apply_form_rebuilds_and_keeps_ids() {
        let mut session = open(MemoryRepository::new());
        let first = session.store().ids()[0];

        let snapshot = FormSnapshot::new()
            .entry("name0", "A")
            .entry("fun0", "0.2")
            .entry("achievement0", "0.8")
            .entry("ease0", "0.5")
            .entry("impact0", "0.5");
        let update = session.apply_form(&snapshot);

        assert_eq!(session.store().ids(), &[first]);
        assert!(matches!(update.changes.as_slice(), [Change::Updated { .. }]));
        assert_eq!(update.frame.personal, vec![Point::new(0.8, 0.2)]);
        assert_eq!(update.frame.collective, vec![Point::new(0.5, 0.5)]);
    }

    #[test]
    fn test_remove_by_id_after_form_rename() {
        let mut session = open(MemoryRepository::new());
        let id = session.store().ids()[0];
        session.apply_form(&FormSnapshot::new().entry("name0", "Renamed"));

        let update = session.remove(id).unwrap();

        assert_eq!(update.changes, vec![Change::Removed { id }]);
        assert!(session.entries().is_empty());
        assert_eq!(session.remove(id).unwrap_err(), StoreError::NotFound(id));
    }

    #[test]
    fn test_import_replaces_everything() {
        let mut session = open(MemoryRepository::new());
        let old = session.store().ids().to_vec();

        let (summary, update) =
            session.import_csv("name,achievement,fun,impact,ease\nX,2,0.5,-1,abc\nY,1,1,1,1\n");

        assert_eq!(summary.imported, 2);
        assert_eq!(names(&session), vec!["X", "Y"]);
        assert!(session.store().ids().iter().all(|id| !old.contains(id)));
        assert_eq!(update.frame.labels, vec!["X", "Y"]);
        let x = session.store().get_at(0).unwrap().1;
        assert_eq!((x.achievement, x.fun, x.impact, x.ease), (0.0, 0.5, 0.0, 0.0));
    }

    #[test]
    fn test_import_nothing_leaves_default() {
        let mut session = open(MemoryRepository::new());
        session.add_objective();

        let (summary, _) = session.import_csv("name,achievement,fun,impact,ease\n");

        assert_eq!(summary.imported, 0);
        assert_eq!(names(&session), vec!["Objective 0"]);
    }

    #[test]
    fn test_export_import_round_trip() {
        let repo = MemoryRepository::new();
        repo.save(&[
            Objective::new("A", 0.2, 0.8, 0.5, 0.5),
            Objective::new("B", 0.0, 1.0, 0.25, 0.75),
        ])
        .unwrap();
        let mut session = open(repo);
        let before = session.store().objectives();

        let text = session.export_csv().unwrap();
        session.import_csv(&text);

        assert_eq!(session.store().objectives(), before);
    }

    #[test]
    fn test_charts_follow_updates() {
        let mut session = open(MemoryRepository::new());
        let id = session.store().ids()[0];

        session
            .update(id, &ObjectivePatch::default().with_axis(Axis::Impact, 1.0))
            .unwrap();

        let chart = session.view().chart(ChartKind::Collective).unwrap();
        assert_eq!(chart.config().points(), &[Point::new(1.0, 0.5)]);
        assert_eq!(session.view().factory().created(), 3);
    }

    #[test]
    fn test_reset() {
        let mut session = open(MemoryRepository::new());
        session.add_objective();
        session.add_objective();

        session.reset();

        assert_eq!(names(&session), vec!["Objective 0"]);
    }
}
