// ── Reactive entity collection ──
//
// Ordered snapshot plus an id index, with push-based change notification
// via `watch` channels. The snapshot keeps server order so list indices
// line up with what the backend returned.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{EntityId, Resource};
use crate::stream::Snapshot;

/// A reactive collection for a single entity type.
///
/// `snapshot` is the source of truth for ordering; `by_id` is a secondary
/// index rebuilt alongside it. Every mutation bumps a version counter.
pub(crate) struct EntityCollection<T: Resource> {
    by_id: DashMap<EntityId, Arc<T>>,
    version: watch::Sender<u64>,
    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Resource> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Replace the whole collection with a fresh fetch.
    pub(crate) fn replace_all(&self, items: Vec<T>) {
        let items: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();
        self.snapshot
            .send_modify(|snap| *snap = Arc::new(items.clone()));
        self.reindex(&items);
        self.bump_version();
    }

    /// Put back a snapshot taken earlier, discarding local edits since.
    pub(crate) fn restore(&self, snapshot: Snapshot<T>) {
        self.reindex(&snapshot);
        self.snapshot.send_replace(snapshot);
        self.bump_version();
    }

    /// Move the item at `from` to `to`, shifting the ones in between.
    /// Returns `false` when either index is out of range.
    pub(crate) fn move_item(&self, from: usize, to: usize) -> bool {
        let moved = self.snapshot.send_if_modified(|snap| {
            if from >= snap.len() || to >= snap.len() {
                return false;
            }
            let mut items = snap.as_ref().clone();
            let item = items.remove(from);
            items.insert(to, item);
            *snap = Arc::new(items);
            true
        });
        if moved {
            self.bump_version();
        }
        moved
    }

    /// Replace the items whose id appears in `ids` with `f` applied to
    /// a copy. Returns how many items changed.
    pub(crate) fn update_where<F>(&self, ids: &[EntityId], mut f: F) -> usize
    where
        F: FnMut(&mut T),
    {
        let mut changed = 0;
        self.snapshot.send_if_modified(|snap| {
            let items: Vec<Arc<T>> = snap
                .iter()
                .map(|item| {
                    if ids.contains(&item.id()) {
                        let mut copy = T::clone(item);
                        f(&mut copy);
                        changed += 1;
                        Arc::new(copy)
                    } else {
                        Arc::clone(item)
                    }
                })
                .collect();
            if changed == 0 {
                return false;
            }
            *snap = Arc::new(items);
            true
        });
        if changed > 0 {
            let current = self.snapshot();
            self.reindex(&current);
            self.bump_version();
        }
        changed
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<Arc<T>> {
        self.by_id.get(&id).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn reindex(&self, items: &[Arc<T>]) {
        self.by_id.clear();
        for item in items {
            self.by_id.insert(item.id(), Arc::clone(item));
        }
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Service;

    fn service(id: u64, order: i64) -> Service {
        Service {
            id: EntityId::new(id),
            name: format!("service-{id}"),
            order,
            ..Service::default()
        }
    }

    fn ids(col: &EntityCollection<Service>) -> Vec<u64> {
        col.snapshot().iter().map(|s| s.id.get()).collect()
    }

    #[test]
    fn replace_all_keeps_server_order() {
        let col = EntityCollection::new();
        col.replace_all(vec![service(3, 1), service(1, 2), service(2, 3)]);

        assert_eq!(ids(&col), [3, 1, 2]);
        assert_eq!(col.get(EntityId::new(1)).unwrap().order, 2);
        assert_eq!(col.len(), 3);
    }

    #[test]
    fn replace_all_drops_stale_index_entries() {
        let col = EntityCollection::new();
        col.replace_all(vec![service(1, 1), service(2, 2)]);
        col.replace_all(vec![service(2, 1)]);

        assert!(col.get(EntityId::new(1)).is_none());
        assert!(col.get(EntityId::new(2)).is_some());
    }

    #[test]
    fn move_item_splices() {
        let col = EntityCollection::new();
        col.replace_all(vec![service(1, 1), service(2, 2), service(3, 3)]);

        assert!(col.move_item(0, 2));
        assert_eq!(ids(&col), [2, 3, 1]);
        assert!(!col.move_item(0, 3));
        assert_eq!(ids(&col), [2, 3, 1]);
    }

    #[test]
    fn restore_undoes_a_splice() {
        let col = EntityCollection::new();
        col.replace_all(vec![service(1, 1), service(2, 2), service(3, 3)]);
        let before = col.snapshot();

        col.move_item(0, 2);
        col.restore(Arc::clone(&before));

        assert_eq!(ids(&col), [1, 2, 3]);
        assert!(Arc::ptr_eq(&before, &col.snapshot()));
        assert_eq!(col.get(EntityId::new(1)).unwrap().order, 1);
    }

    #[test]
    fn update_where_copies_only_matching_items() {
        let col = EntityCollection::new();
        col.replace_all(vec![service(1, 1), service(2, 2), service(3, 3)]);
        let untouched = col.snapshot()[2].clone();

        let changed = col.update_where(&[EntityId::new(1), EntityId::new(2)], |s| s.order *= 10);

        assert_eq!(changed, 2);
        assert_eq!(col.get(EntityId::new(2)).unwrap().order, 20);
        assert!(Arc::ptr_eq(&untouched, &col.snapshot()[2]));
    }

    #[test]
    fn every_mutation_bumps_version() {
        let col = EntityCollection::new();
        let start = col.version();
        col.replace_all(vec![service(1, 1), service(2, 2)]);
        col.move_item(0, 1);
        col.update_where(&[EntityId::new(9)], |_| {});
        assert_eq!(col.version(), start + 2);
    }
}
