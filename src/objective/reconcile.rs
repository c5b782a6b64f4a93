//! List reconciliation
//!
//! Diffs two id-keyed snapshots of the store into the minimal set of
//! create/update/remove/move operations a view needs to apply, instead of
//! rebuilding every row after each edit.

use serde::Serialize;
use std::collections::HashMap;

use super::store::StoredObjective;
use super::types::{Objective, ObjectiveId};

/// One operation needed to turn the previous list into the next one
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change {
    /// A new objective appeared at `position`
    Created {
        id: ObjectiveId,
        position: usize,
        objective: Objective,
    },
    /// An existing objective's fields changed
    Updated { id: ObjectiveId, objective: Objective },
    /// An objective was deleted
    Removed { id: ObjectiveId },
    /// An existing objective changed place relative to the others
    Moved { id: ObjectiveId, position: usize },
}

impl Change {
    pub fn id(&self) -> ObjectiveId {
        match self {
            Change::Created { id, .. }
            | Change::Updated { id, .. }
            | Change::Removed { id }
            | Change::Moved { id, .. } => *id,
        }
    }
}

/// Compute the operations that turn `previous` into `next`
///
/// Removals come first, then creations, updates and moves, each in the
/// display order of the list they refer to. Only objectives outside the
/// longest run that kept its relative order are reported as moved, so
/// moving one objective yields one `Moved`.
pub fn diff(previous: &[StoredObjective], next: &[StoredObjective]) -> Vec<Change> {
    let before: HashMap<ObjectiveId, &Objective> =
        previous.iter().map(|e| (e.id, &e.objective)).collect();
    let after: HashMap<ObjectiveId, &Objective> =
        next.iter().map(|e| (e.id, &e.objective)).collect();

    let mut changes: Vec<Change> = previous
        .iter()
        .filter(|e| !after.contains_key(&e.id))
        .map(|e| Change::Removed { id: e.id })
        .collect();

    let mut created = Vec::new();
    let mut updated = Vec::new();
    for (position, entry) in next.iter().enumerate() {
        match before.get(&entry.id) {
            None => created.push(Change::Created {
                id: entry.id,
                position,
                objective: entry.objective.clone(),
            }),
            Some(old) if **old != entry.objective => updated.push(Change::Updated {
                id: entry.id,
                objective: entry.objective.clone(),
            }),
            Some(_) => {}
        }
    }
    changes.extend(created);
    changes.extend(updated);

    // Old relative rank of every objective present in both lists
    let old_rank: HashMap<ObjectiveId, usize> = previous
        .iter()
        .filter(|e| after.contains_key(&e.id))
        .enumerate()
        .map(|(rank, e)| (e.id, rank))
        .collect();
    let kept: Vec<(usize, ObjectiveId, usize)> = next
        .iter()
        .enumerate()
        .filter_map(|(position, e)| old_rank.get(&e.id).map(|rank| (position, e.id, *rank)))
        .collect();

    let ranks: Vec<usize> = kept.iter().map(|(_, _, rank)| *rank).collect();
    let stable = longest_increasing(&ranks);
    for (i, (position, id, _)) in kept.into_iter().enumerate() {
        if !stable[i] {
            changes.push(Change::Moved { id, position });
        }
    }

    changes
}

/// Mark the members of one longest strictly increasing subsequence
fn longest_increasing(values: &[usize]) -> Vec<bool> {
    // tails[k]: index of the smallest tail of an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<usize>> = vec![None; values.len()];

    for (i, value) in values.iter().enumerate() {
        let len = tails.partition_point(|&t| values[t] < *value);
        if len > 0 {
            parent[i] = Some(tails[len - 1]);
        }
        if len == tails.len() {
            tails.push(i);
        } else {
            tails[len] = i;
        }
    }

    let mut member = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        member[i] = true;
        cursor = parent[i];
    }
    member
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::ObjectiveStore;

    fn entry(id: u64, name: &str) -> StoredObjective {
        StoredObjective {
            id: ObjectiveId(id),
            objective: Objective::new(name, 0.5, 0.5, 0.5, 0.5),
        }
    }

    #[test]
    fn test_identical_lists_produce_nothing() {
        let list = vec![entry(0, "a"), entry(1, "b")];
        assert!(diff(&list, &list).is_empty());
    }

    #[test]
    fn test_remove_middle_does_not_touch_neighbours() {
        let previous = vec![entry(0, "a"), entry(1, "b"), entry(2, "c")];
        let next = vec![entry(0, "a"), entry(2, "c")];

        let changes = diff(&previous, &next);

        assert_eq!(changes, vec![Change::Removed { id: ObjectiveId(1) }]);
    }

    #[test]
    fn test_create_and_update() {
        let previous = vec![entry(0, "a")];
        let next = vec![entry(0, "renamed"), entry(5, "new")];

        let changes = diff(&previous, &next);

        assert_eq!(changes.len(), 2);
        assert!(matches!(
            &changes[0],
            Change::Created { id: ObjectiveId(5), position: 1, .. }
        ));
        assert!(matches!(
            &changes[1],
            Change::Updated { id: ObjectiveId(0), objective } if objective.name == "renamed"
        ));
    }

    #[test]
    fn test_moves() {
        let previous = vec![entry(0, "a"), entry(1, "b"), entry(2, "c")];
        let next = vec![entry(2, "c"), entry(0, "a"), entry(1, "b")];

        let changes = diff(&previous, &next);

        assert_eq!(
            changes,
            vec![Change::Moved {
                id: ObjectiveId(2),
                position: 0
            }]
        );
    }

    #[test]
    fn test_moving_last_to_front_is_one_move() {
        let objectives = (0..5)
            .map(|i| Objective::new(format!("o{}", i), 0.5, 0.5, 0.5, 0.5))
            .collect();
        let mut store = ObjectiveStore::from_objectives(objectives);
        let previous = store.entries();
        let last = store.ids()[4];
        store.move_to(last, 0).unwrap();

        let changes = diff(&previous, &store.entries());

        assert_eq!(
            changes,
            vec![Change::Moved {
                id: last,
                position: 0
            }]
        );
    }

    #[test]
    fn test_remove_create_update_and_move_order() {
        let previous = vec![entry(0, "a"), entry(1, "b"), entry(2, "c"), entry(3, "d")];
        let next = vec![entry(3, "d"), entry(0, "a2"), entry(9, "new"), entry(2, "c")];

        let changes = diff(&previous, &next);

        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0], Change::Removed { id: ObjectiveId(1) });
        assert!(matches!(
            &changes[1],
            Change::Created { id: ObjectiveId(9), position: 2, .. }
        ));
        assert!(matches!(&changes[2], Change::Updated { id: ObjectiveId(0), .. }));
        assert_eq!(
            changes[3],
            Change::Moved {
                id: ObjectiveId(3),
                position: 0
            }
        );
    }

    #[test]
    fn test_longest_increasing_marks_stable_run() {
        assert_eq!(
            longest_increasing(&[4, 0, 1, 2, 3]),
            vec![false, true, true, true, true]
        );
        assert!(longest_increasing(&[]).is_empty());
    }
}
