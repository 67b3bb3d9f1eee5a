// ── ResourceStore ──
//
// Cached view of one admin collection. `load()` replaces the snapshot
// wholesale; mutations go to the backend and then reconcile according to
// the store's `Reconciliation` policy. The only local write ahead of the
// server is the reorder splice.

use std::sync::Arc;

use atelier_api::{ApiClient, Attachment};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::collection::EntityCollection;
use crate::error::{CoreError, for_entity};
use crate::model::{EntityId, Resource, Service, ServiceOrder};
use crate::stream::{EntityStream, Snapshot};

/// What a store does after a successful mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reconciliation {
    /// Re-fetch the whole collection. One extra round-trip per mutation,
    /// but the cache always equals server state.
    #[default]
    FullReload,
    /// Leave the cache alone until the next explicit `load()`. For one-shot
    /// callers that never read the cache after mutating.
    Deferred,
}

/// Owns the cached snapshot of one entity collection.
pub struct ResourceStore<T: Resource> {
    client: Arc<ApiClient>,
    items: EntityCollection<T>,
    load_error: watch::Sender<Option<String>>,
    reconciliation: Reconciliation,
    scope: Vec<(&'static str, String)>,
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(client: Arc<ApiClient>, reconciliation: Reconciliation) -> Self {
        let (load_error, _) = watch::channel(None);
        Self {
            client,
            items: EntityCollection::new(),
            load_error,
            reconciliation,
            scope: Vec::new(),
        }
    }

    /// Narrow every `load()` with a query parameter (e.g. `job=<id>`).
    pub fn scoped(mut self, key: &'static str, value: impl ToString) -> Self {
        self.scope.push((key, value.to_string()));
        self
    }

    pub fn reconciliation(&self) -> Reconciliation {
        self.reconciliation
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch the full collection and replace the cache.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// published on the `load_error` channel.
    pub async fn load(&self) -> Result<usize, CoreError> {
        debug!(collection = T::PATH, "loading");
        match self.client.list::<T>(&self.scope).await {
            Ok(items) => {
                let count = items.len();
                self.items.replace_all(items);
                self.load_error.send_replace(None);
                debug!(collection = T::PATH, count, "loaded");
                Ok(count)
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(
                    collection = T::PATH,
                    error = %err,
                    "load failed, keeping previous snapshot"
                );
                self.load_error.send_replace(Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// Fetch a single record from its detail endpoint, bypassing the cache.
    pub async fn fetch(&self, id: EntityId) -> Result<T, CoreError> {
        self.client
            .fetch::<T>(id)
            .await
            .map_err(|e| for_entity(e, T::NOUN, id))
    }

    pub fn get(&self, id: EntityId) -> Option<Arc<T>> {
        self.items.get(id)
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        self.items.snapshot()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped on every change to the cached snapshot.
    pub fn version(&self) -> u64 {
        self.items.version()
    }

    pub fn subscribe(&self) -> EntityStream<T> {
        EntityStream::new(self.items.subscribe())
    }

    /// The message of the last failed `load()`, cleared by the next success.
    pub fn load_error(&self) -> Option<String> {
        self.load_error.borrow().clone()
    }

    pub fn subscribe_load_error(&self) -> watch::Receiver<Option<String>> {
        self.load_error.subscribe()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a record. Multipart when `file` is present.
    pub async fn add(&self, entity: &T, file: Option<&Attachment>) -> Result<T, CoreError> {
        let created: T = self.client.create::<T, _>(&entity.to_patch(), file).await?;
        debug!(collection = T::PATH, id = %created.id(), "created");
        self.reconcile().await;
        Ok(created)
    }

    /// Partially update a record.
    pub async fn update(
        &self,
        id: EntityId,
        patch: &T::Patch,
        file: Option<&Attachment>,
    ) -> Result<T, CoreError> {
        let updated: T = self
            .client
            .update::<T, _>(id, patch, file)
            .await
            .map_err(|e| for_entity(e, T::NOUN, id))?;
        debug!(collection = T::PATH, %id, "updated");
        self.reconcile().await;
        Ok(updated)
    }

    pub async fn remove(&self, id: EntityId) -> Result<(), CoreError> {
        self.client
            .remove::<T>(id)
            .await
            .map_err(|e| for_entity(e, T::NOUN, id))?;
        debug!(collection = T::PATH, %id, "removed");
        self.reconcile().await;
        Ok(())
    }

    async fn reconcile(&self) {
        if self.reconciliation == Reconciliation::FullReload {
            // `load()` already logged and published the failure.
            let _ = self.load().await;
        }
    }
}

// ── Service ordering ─────────────────────────────────────────────────

impl ResourceStore<Service> {
    /// Persist new `order` values. On success the affected rows are patched
    /// locally before reconciling.
    pub async fn reorder(&self, orders: &[ServiceOrder]) -> Result<(), CoreError> {
        self.client.reorder_services(orders).await?;

        let ids: Vec<EntityId> = orders.iter().map(|o| o.id).collect();
        self.items.update_where(&ids, |service| {
            if let Some(o) = orders.iter().find(|o| o.id == service.id) {
                service.order = o.order;
            }
        });
        debug!(count = orders.len(), "services reordered");
        self.reconcile().await;
        Ok(())
    }

    /// Splice-move a row in the cached list ahead of the server call.
    pub(crate) fn move_local(&self, from: usize, to: usize) -> bool {
        self.items.move_item(from, to)
    }

    /// Drop any local splice by putting back a snapshot taken before it.
    pub(crate) fn restore_local(&self, snapshot: Snapshot<Service>) {
        self.items.restore(snapshot);
    }
}
