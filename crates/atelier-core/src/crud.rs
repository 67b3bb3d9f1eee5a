// ── CRUD controller ──
//
// Editing state machine for one entity type, layered over its store:
//
//   Idle ──open_modal──▶ Editing ──save──▶ Saving ──ok──▶ Idle
//                          ▲                 │
//                          └──────err────────┘
//
// The draft is always a copy; the store snapshot is never aliased, so a
// half-edited row cannot show up in the list before the backend accepts it.
// List filtering is a pure projection over the current snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;
use atelier_api::Attachment;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{BinaryStatus, EntityId, JobApplication, Resource, ValidationErrors};
use crate::store::ResourceStore;
use crate::stream::Query;

// ── Editor state ─────────────────────────────────────────────────────

/// An open edit form.
#[derive(Debug, Clone)]
pub struct Editor<T> {
    pub draft: T,
    /// Per-field messages from client validation or the backend.
    pub errors: ValidationErrors,
    /// Form-level message from the last failed save.
    pub message: Option<String>,
    pub attachment: Option<Attachment>,
}

impl<T> Editor<T> {
    fn new(draft: T) -> Self {
        Self {
            draft,
            errors: ValidationErrors::new(),
            message: None,
            attachment: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum EditorState<T> {
    Idle,
    Editing(Editor<T>),
    /// A save is in flight for this draft.
    Saving(T),
}

impl<T> EditorState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Saving(_))
    }
}

/// Blocking yes/no prompt consulted before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// Mediates between a [`ResourceStore`] and an editable list view.
pub struct CrudController<T: Resource> {
    store: Arc<ResourceStore<T>>,
    editor: watch::Sender<EditorState<T>>,
    query: ArcSwap<Query<T::Status>>,
}

impl<T: Resource> CrudController<T> {
    pub fn new(store: Arc<ResourceStore<T>>) -> Self {
        let (editor, _) = watch::channel(EditorState::Idle);
        Self {
            store,
            editor,
            query: ArcSwap::from_pointee(Query::default()),
        }
    }

    pub fn store(&self) -> &Arc<ResourceStore<T>> {
        &self.store
    }

    pub async fn load(&self) -> Result<usize, CoreError> {
        self.store.load().await
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Open the editor on a copy of `existing`, or on a fresh draft.
    ///
    /// Replaces any draft already open. Refused while a save is in flight.
    pub fn open_modal(&self, existing: Option<&T>) -> Result<(), CoreError> {
        let draft = existing.cloned().unwrap_or_else(T::draft);
        let id = draft.id();
        let mut busy = false;
        self.editor.send_if_modified(|state| {
            if state.is_saving() {
                busy = true;
                return false;
            }
            *state = EditorState::Editing(Editor::new(draft));
            true
        });
        if busy {
            return Err(CoreError::EditorBusy);
        }
        debug!(collection = T::PATH, %id, "editor opened");
        Ok(())
    }

    /// Mutate the open draft in place.
    pub fn edit<F: FnOnce(&mut T)>(&self, f: F) -> Result<(), CoreError> {
        self.with_editor(|editor| f(&mut editor.draft))
    }

    /// Attach a file to be uploaded with the next save.
    pub fn attach(&self, file: Attachment) -> Result<(), CoreError> {
        self.with_editor(|editor| editor.attachment = Some(file))
    }

    /// Close the editor, discarding the draft.
    pub fn cancel(&self) -> Result<(), CoreError> {
        let mut busy = false;
        self.editor.send_if_modified(|state| match state {
            EditorState::Saving(_) => {
                busy = true;
                false
            }
            EditorState::Idle => false,
            EditorState::Editing(_) => {
                *state = EditorState::Idle;
                true
            }
        });
        if busy { Err(CoreError::EditorBusy) } else { Ok(()) }
    }

    pub fn editor(&self) -> EditorState<T> {
        self.editor.borrow().clone()
    }

    pub fn subscribe_editor(&self) -> watch::Receiver<EditorState<T>> {
        self.editor.subscribe()
    }

    /// Validate and persist the open draft.
    ///
    /// New drafts (id 0) are created, others updated with their full patch.
    /// The editor returns to `Idle` only once the backend confirms; on any
    /// failure it stays open with the error attached.
    pub async fn save(&self) -> Result<T, CoreError> {
        let (draft, attachment) = self.begin_save()?;
        let id = draft.id();

        let result = if id.is_new() {
            self.store.add(&draft, attachment.as_ref()).await
        } else {
            self.store
                .update(id, &draft.to_patch(), attachment.as_ref())
                .await
        };

        match result {
            Ok(saved) => {
                self.editor.send_replace(EditorState::Idle);
                info!(collection = T::PATH, id = %saved.id(), "saved");
                Ok(saved)
            }
            Err(err) => {
                warn!(collection = T::PATH, %id, error = %err, "save failed");
                self.editor.send_replace(EditorState::Editing(Editor {
                    draft,
                    errors: err.field_errors().unwrap_or_default(),
                    message: Some(err.to_string()),
                    attachment,
                }));
                Err(err)
            }
        }
    }

    // ── Row actions ──────────────────────────────────────────────────

    /// Delete after confirmation. Returns `false` when the prompt was
    /// declined, in which case no request is made.
    pub async fn delete(&self, id: EntityId, confirm: &impl Confirm) -> Result<bool, CoreError> {
        let prompt = match self.store.get(id) {
            Some(entity) => format!(
                "Delete {} \"{}\"?",
                T::NOUN,
                entity.search_fields().first().copied().unwrap_or_default()
            ),
            None => format!("Delete {} {id}?", T::NOUN),
        };
        if !confirm.confirm(&prompt) {
            debug!(collection = T::PATH, %id, "delete declined");
            return Ok(false);
        }
        self.store.remove(id).await?;
        info!(collection = T::PATH, %id, "deleted");
        Ok(true)
    }

    /// Set an explicit status. On failure the store reloads so the
    /// displayed status is the server's.
    pub async fn set_status(&self, id: EntityId, status: T::Status) -> Result<T, CoreError> {
        match self.store.update(id, &T::status_patch(status), None).await {
            Ok(updated) => Ok(updated),
            Err(err) => {
                self.revert(id, &err).await;
                Err(err)
            }
        }
    }

    async fn revert(&self, id: EntityId, err: &CoreError) {
        warn!(collection = T::PATH, %id, error = %err, "status change failed, reloading");
        let _ = self.store.load().await;
    }

    // ── Filtering ────────────────────────────────────────────────────

    pub fn set_search(&self, term: impl Into<String>) {
        let term = term.into();
        self.query.rcu(|q| Query {
            search: term.clone(),
            status: q.status,
        });
    }

    pub fn set_status_filter(&self, status: Option<T::Status>) {
        self.query.rcu(|q| Query {
            search: q.search.clone(),
            status,
        });
    }

    pub fn clear_filters(&self) {
        self.query.store(Arc::new(Query::default()));
    }

    pub fn query(&self) -> Query<T::Status> {
        Query::clone(&self.query.load())
    }

    pub fn is_filtered(&self) -> bool {
        self.query.load().is_active()
    }

    /// The current snapshot narrowed by search term and status filter.
    /// Recomputed on every call.
    pub fn filtered_view(&self) -> Vec<Arc<T>> {
        let query = self.query.load();
        self.store
            .snapshot()
            .iter()
            .filter(|entity| query.matches(&***entity))
            .cloned()
            .collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn with_editor<F: FnOnce(&mut Editor<T>)>(&self, f: F) -> Result<(), CoreError> {
        let mut outcome = Err(CoreError::NoDraft);
        self.editor.send_if_modified(|state| match state {
            EditorState::Editing(editor) => {
                f(editor);
                outcome = Ok(());
                true
            }
            EditorState::Saving(_) => {
                outcome = Err(CoreError::EditorBusy);
                false
            }
            EditorState::Idle => false,
        });
        outcome
    }

    /// Validate the open draft and move to `Saving`.
    fn begin_save(&self) -> Result<(T, Option<Attachment>), CoreError> {
        let mut outcome = Err(CoreError::NoDraft);
        self.editor.send_if_modified(|state| {
            let EditorState::Editing(editor) = state else {
                if state.is_saving() {
                    outcome = Err(CoreError::EditorBusy);
                }
                return false;
            };
            if let Err(errors) = editor.draft.validate() {
                editor.errors = errors.clone();
                editor.message = None;
                outcome = Err(CoreError::Validation(errors));
                return true;
            }
            let draft = editor.draft.clone();
            let attachment = editor.attachment.take();
            *state = EditorState::Saving(draft.clone());
            outcome = Ok((draft, attachment));
            true
        });
        outcome
    }
}

impl<T: BinaryStatus> CrudController<T> {
    /// Flip a two-state status (draft/published, active/inactive).
    ///
    /// Sends a patch holding only the new status. On failure the store
    /// reloads so the displayed status is the server's.
    pub async fn toggle_status(&self, entity: &T) -> Result<T, CoreError> {
        let next = T::toggled(entity.status());
        debug!(collection = T::PATH, id = %entity.id(), %next, "toggling status");
        self.set_status(entity.id(), next).await
    }
}

impl CrudController<JobApplication> {
    /// Full application details. Falls back to the cached list row when
    /// the detail request fails for any reason other than the session.
    pub async fn view(&self, id: EntityId) -> Result<JobApplication, CoreError> {
        match self.store.fetch(id).await {
            Ok(application) => Ok(application),
            Err(err) if err.requires_login() => Err(err),
            Err(err) => match self.store.get(id) {
                Some(row) => {
                    warn!(%id, error = %err, "application detail unavailable, using list row");
                    Ok(JobApplication::clone(&row))
                }
                None => Err(err),
            },
        }
    }
}
