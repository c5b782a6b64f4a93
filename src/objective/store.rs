//! Objective Store
//!
//! In-memory ordered collection of objectives. Records live in an
//! id → objective map; display order is a separate sequence of ids. Positional
//! indices are derived from that sequence and are only used at the edges
//! (form field names, `remove_at`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{StoreError, StoreResult};
use super::types::{Objective, ObjectiveId, ObjectivePatch};
use crate::persistence::{ObjectiveRepository, PersistenceResult};

/// An objective together with its stable id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredObjective {
    pub id: ObjectiveId,
    #[serde(flatten)]
    pub objective: Objective,
}

/// Ordered objective collection keyed by stable ids
#[derive(Debug, Clone, Default)]
pub struct ObjectiveStore {
    records: HashMap<ObjectiveId, Objective>,
    order: Vec<ObjectiveId>,
    next_id: u64,
}

impl ObjectiveStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `objectives` in order, with fresh ids
    pub fn from_objectives(objectives: Vec<Objective>) -> Self {
        let mut store = Self::new();
        for objective in objectives {
            store.push(objective);
        }
        store
    }

    /// Load the persisted list, degrading to an empty list on any failure
    pub fn load_from_persistence<R: ObjectiveRepository + ?Sized>(repo: &R) -> Vec<Objective> {
        match repo.load() {
            Ok(objectives) => objectives,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load objectives, starting empty");
                Vec::new()
            }
        }
    }

    /// Write the current list to the repository
    pub fn persist<R: ObjectiveRepository + ?Sized>(&self, repo: &R) -> PersistenceResult<()> {
        repo.save(&self.objectives())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in display order
    pub fn ids(&self) -> &[ObjectiveId] {
        &self.order
    }

    pub fn get(&self, id: ObjectiveId) -> Option<&Objective> {
        self.records.get(&id)
    }

    /// Objective at a display position
    pub fn get_at(&self, index: usize) -> Option<(ObjectiveId, &Objective)> {
        let id = *self.order.get(index)?;
        self.records.get(&id).map(|o| (id, o))
    }

    /// Display position of an id
    pub fn position(&self, id: ObjectiveId) -> Option<usize> {
        self.order.iter().position(|x| *x == id)
    }

    /// Iterate `(id, objective)` in display order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectiveId, &Objective)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|o| (*id, o)))
    }

    /// Clone the objectives in display order
    pub fn objectives(&self) -> Vec<Objective> {
        self.iter().map(|(_, o)| o.clone()).collect()
    }

    /// Clone the objectives with their ids in display order
    pub fn entries(&self) -> Vec<StoredObjective> {
        self.iter()
            .map(|(id, o)| StoredObjective {
                id,
                objective: o.clone(),
            })
            .collect()
    }

    fn allocate_id(&mut self) -> ObjectiveId {
        let id = ObjectiveId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an objective, returning its new id
    pub fn push(&mut self, objective: Objective) -> ObjectiveId {
        let id = self.allocate_id();
        self.records.insert(id, objective);
        self.order.push(id);
        id
    }

    /// Append a default objective named after its position
    pub fn add_default(&mut self) -> ObjectiveId {
        let objective = Objective::new_default(self.len());
        self.push(objective)
    }

    /// Add one default objective if the store is empty
    pub fn ensure_not_empty(&mut self) -> Option<ObjectiveId> {
        if self.is_empty() {
            Some(self.add_default())
        } else {
            None
        }
    }

    /// Apply a partial update to one objective
    pub fn update(&mut self, id: ObjectiveId, patch: &ObjectivePatch) -> StoreResult<&Objective> {
        let objective = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        objective.apply(patch);
        Ok(objective)
    }

    /// Remove an objective by id; later objectives move up one position
    pub fn remove(&mut self, id: ObjectiveId) -> StoreResult<Objective> {
        let position = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.order.remove(position);
        self.records.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Remove the objective at a display position
    pub fn remove_at(&mut self, index: usize) -> StoreResult<(ObjectiveId, Objective)> {
        let id = *self.order.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        self.remove(id).map(|o| (id, o))
    }

    /// Move an objective to a new display position
    pub fn move_to(&mut self, id: ObjectiveId, index: usize) -> StoreResult<()> {
        let from = self.position(id).ok_or(StoreError::NotFound(id))?;
        if index >= self.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let id = self.order.remove(from);
        self.order.insert(index, id);
        Ok(())
    }

    /// Replace every objective; all get fresh ids
    pub fn replace_all(&mut self, objectives: Vec<Objective>) {
        self.records.clear();
        self.order.clear();
        for objective in objectives {
            self.push(objective);
        }
    }

    /// Replace the list with a positional rebuild
    ///
    /// The objective at position `i` keeps the id that position had before,
    /// positions past the old length get fresh ids and positions past the new
    /// length are dropped.
    pub fn replace_from_form(&mut self, objectives: Vec<Objective>) {
        let old_order = std::mem::take(&mut self.order);
        let mut records = HashMap::with_capacity(objectives.len());
        let mut order = Vec::with_capacity(objectives.len());

        for (index, objective) in objectives.into_iter().enumerate() {
            let id = match old_order.get(index) {
                Some(id) => *id,
                None => self.allocate_id(),
            };
            records.insert(id, objective);
            order.push(id);
        }

        self.records = records;
        self.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::Axis;
    use crate::persistence::{MemoryRepository, PersistenceError};

    fn named(names: &[&str]) -> Vec<Objective> {
        names
            .iter()
            .map(|n| Objective::new(*n, 0.5, 0.5, 0.5, 0.5))
            .collect()
    }

    fn names(store: &ObjectiveStore) -> Vec<String> {
        store.iter().map(|(_, o)| o.name.clone()).collect()
    }

    #[test]
    fn test_add_default_names_by_position() {
        let mut store = ObjectiveStore::new();
        store.add_default();
        store.add_default();

        assert_eq!(names(&store), vec!["Objective 0", "Objective 1"]);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = ObjectiveStore::new();
        let a = store.add_default();
        store.remove(a).unwrap();
        let b = store.add_default();

        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_at_preserves_order() {
        let mut store = ObjectiveStore::from_objectives(named(&["a", "b", "c", "d"]));
        let c = store.get_at(2).unwrap().0;

        let (_, removed) = store.remove_at(1).unwrap();

        assert_eq!(removed.name, "b");
        assert_eq!(store.len(), 3);
        assert_eq!(names(&store), vec!["a", "c", "d"]);
        // "c" moved from position 2 to 1 but kept its id
        assert_eq!(store.position(c), Some(1));
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut store = ObjectiveStore::from_objectives(named(&["a"]));
        assert_eq!(
            store.remove_at(5),
            Err(StoreError::IndexOutOfRange { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = ObjectiveStore::new();
        assert_eq!(
            store.remove(ObjectiveId(9)),
            Err(StoreError::NotFound(ObjectiveId(9)))
        );
    }

    #[test]
    fn test_update() {
        let mut store = ObjectiveStore::new();
        let id = store.add_default();

        let patch = ObjectivePatch::default().with_axis(Axis::Ease, 0.2);
        store.update(id, &patch).unwrap();

        assert_eq!(store.get(id).unwrap().ease, 0.2);
    }

    #[test]
    fn test_move_to() {
        let mut store = ObjectiveStore::from_objectives(named(&["a", "b", "c"]));
        let a = store.ids()[0];

        store.move_to(a, 2).unwrap();

        assert_eq!(names(&store), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_replace_from_form_keeps_positional_ids() {
        let mut store = ObjectiveStore::from_objectives(named(&["a", "b"]));
        let before = store.ids().to_vec();

        store.replace_from_form(named(&["a2", "b2", "c2"]));

        assert_eq!(store.ids()[..2], before[..]);
        assert!(!before.contains(&store.ids()[2]));
        assert_eq!(names(&store), vec!["a2", "b2", "c2"]);

        store.replace_from_form(named(&["x"]));
        assert_eq!(store.ids(), &before[..1]);
    }

    #[test]
    fn test_replace_all_assigns_fresh_ids() {
        let mut store = ObjectiveStore::from_objectives(named(&["a", "b"]));
        let before = store.ids().to_vec();

        store.replace_all(named(&["c"]));

        assert_eq!(store.len(), 1);
        assert!(!before.contains(&store.ids()[0]));
    }

    #[test]
    fn test_load_from_corrupt_persistence_is_empty() {
        let repo = MemoryRepository::with_raw("definitely not json");
        assert!(matches!(repo.load(), Err(PersistenceError::Corrupt(_))));

        let objectives = ObjectiveStore::load_from_persistence(&repo);
        assert!(objectives.is_empty());

        let mut store = ObjectiveStore::from_objectives(objectives);
        store.ensure_not_empty();
        assert_eq!(names(&store), vec!["Objective 0"]);
    }

    #[test]
    fn test_persist_round_trip() {
        let repo = MemoryRepository::new();
        let store = ObjectiveStore::from_objectives(named(&["a", "b"]));

        store.persist(&repo).unwrap();

        assert_eq!(ObjectiveStore::load_from_persistence(&repo), named(&["a", "b"]));
    }
}
