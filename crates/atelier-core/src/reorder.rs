// ── Reorder coordinator ──
//
// Drag-and-drop reordering of services. The dragged row is spliced into
// place locally first, then the two affected `order` values are swapped on
// the server. A failed swap is undone by reloading; if that reload fails
// too, the pre-splice snapshot is put back.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::crud::CrudController;
use crate::error::CoreError;
use crate::model::{EntityId, Service, ServiceOrder};

/// Why a move was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    SameIndex,
    OutOfRange,
    /// A search or status filter is active, so visible indices do not
    /// correspond to server order.
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    Moved {
        moved: EntityId,
        target: EntityId,
        /// The swap that was persisted.
        orders: [ServiceOrder; 2],
    },
    Skipped(SkipReason),
}

pub struct ReorderCoordinator {
    services: Arc<CrudController<Service>>,
}

impl ReorderCoordinator {
    pub fn new(services: Arc<CrudController<Service>>) -> Self {
        Self { services }
    }

    /// Whether dragging is meaningful right now. Front ends hide the drag
    /// handle when this is `false`.
    pub fn can_reorder(&self) -> bool {
        !self.services.is_filtered()
    }

    /// Move the row at `from` onto the row at `to`.
    ///
    /// On backend failure the store is reloaded and the error returned; the
    /// list then equals a fresh load, or the last one when the reload fails.
    pub async fn move_to(&self, from: usize, to: usize) -> Result<ReorderOutcome, CoreError> {
        if !self.can_reorder() {
            return Ok(ReorderOutcome::Skipped(SkipReason::Filtered));
        }
        if from == to {
            return Ok(ReorderOutcome::Skipped(SkipReason::SameIndex));
        }

        let store = self.services.store();
        let list = store.snapshot();
        let (Some(moved), Some(target)) = (list.get(from), list.get(to)) else {
            return Ok(ReorderOutcome::Skipped(SkipReason::OutOfRange));
        };

        let orders = [
            ServiceOrder {
                id: moved.id,
                order: target.order,
            },
            ServiceOrder {
                id: target.id,
                order: moved.order,
            },
        ];
        let (moved, target) = (moved.id, target.id);
        let before = Arc::clone(&list);

        store.move_local(from, to);
        debug!(%moved, %target, from, to, "service moved locally");

        if let Err(err) = store.reorder(&orders).await {
            warn!(error = %err, "reorder failed, reloading services");
            if store.load().await.is_err() {
                warn!("reload failed too, restoring the last loaded order");
                store.restore_local(before);
            }
            return Err(err);
        }

        Ok(ReorderOutcome::Moved {
            moved,
            target,
            orders,
        })
    }
}
