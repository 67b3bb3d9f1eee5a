// Client-side session state
//
// Holds the bearer token pair and the current user, mirrors them to a
// durable `SessionStore`, and broadcasts state changes over a `watch`
// channel. The store is read exactly once, when the session is created.
// `ApiClient` consults the session on every request and calls `expire()`
// whenever the backend answers 401.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::models::User;

// ── Persisted form ───────────────────────────────────────────────────

/// What survives a restart: access token, refresh token, user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    pub current_user: User,
}

/// Durable storage for the session.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, Error>;
    fn save(&self, session: &StoredSession) -> Result<(), Error>;
    fn clear(&self) -> Result<(), Error>;
}

/// JSON file store (`session.json` under the platform data directory).
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>, Error> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| Error::Deserialization {
                message: format!("corrupt session file {}: {e}", self.path.display()),
                body: String::new(),
            })
    }

    fn save(&self, session: &StoredSession) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: ArcSwapOption<StoredSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, as if a previous run had logged in.
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: ArcSwapOption::from_pointee(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>, Error> {
        Ok(self.slot.load_full().map(|s| (*s).clone()))
    }

    fn save(&self, session: &StoredSession) -> Result<(), Error> {
        self.slot.store(Some(Arc::new(session.clone())));
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.slot.store(None);
        Ok(())
    }
}

// ── Live session ─────────────────────────────────────────────────────

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in.
    Anonymous,
    /// A token is held for this user.
    Authenticated(Arc<User>),
    /// The backend rejected the token; front ends should route to login.
    Expired,
}

struct Credentials {
    access: SecretString,
    refresh: SecretString,
    user: Arc<User>,
}

/// Shared session context. Cheap to share behind an `Arc`.
pub struct Session {
    current: ArcSwapOption<Credentials>,
    store: Box<dyn SessionStore>,
    state: watch::Sender<SessionState>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session backed by `store`, restoring any persisted login.
    pub fn new(store: impl SessionStore + 'static) -> Self {
        let restored = match store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable persisted session");
                None
            }
        };

        let (current, initial) = match restored {
            Some(s) => {
                let user = Arc::new(s.current_user);
                debug!(email = %user.email, "restored persisted session");
                (
                    Some(Arc::new(Credentials {
                        access: SecretString::from(s.access_token),
                        refresh: SecretString::from(s.refresh_token),
                        user: Arc::clone(&user),
                    })),
                    SessionState::Authenticated(user),
                )
            }
            None => (None, SessionState::Anonymous),
        };

        let (state, _) = watch::channel(initial);
        Self {
            current: ArcSwapOption::new(current),
            store: Box::new(store),
            state,
        }
    }

    /// A session that is never persisted.
    pub fn ephemeral() -> Self {
        Self::new(MemorySessionStore::new())
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn access_token(&self) -> Option<SecretString> {
        self.current.load_full().map(|c| c.access.clone())
    }

    pub fn refresh_token(&self) -> Option<SecretString> {
        self.current.load_full().map(|c| c.refresh.clone())
    }

    pub fn user(&self) -> Option<Arc<User>> {
        self.current.load_full().map(|c| Arc::clone(&c.user))
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.load().is_some()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Install a fresh token pair after login or register.
    pub fn establish(&self, user: User, access: String, refresh: String) {
        let stored = StoredSession {
            access_token: access,
            refresh_token: refresh,
            current_user: user,
        };
        if let Err(e) = self.store.save(&stored) {
            warn!(error = %e, "failed to persist session");
        }

        let user = Arc::new(stored.current_user);
        info!(email = %user.email, "session established");
        self.current.store(Some(Arc::new(Credentials {
            access: SecretString::from(stored.access_token),
            refresh: SecretString::from(stored.refresh_token),
            user: Arc::clone(&user),
        })));
        self.state.send_replace(SessionState::Authenticated(user));
    }

    /// Swap in a refreshed access token, keeping the user.
    ///
    /// Returns `false` if there is no session to refresh.
    pub fn rotate(&self, access: String, refresh: Option<String>) -> bool {
        let Some(existing) = self.current.load_full() else {
            return false;
        };

        let refresh = refresh.unwrap_or_else(|| existing.refresh.expose_secret().to_owned());
        let stored = StoredSession {
            access_token: access,
            refresh_token: refresh,
            current_user: (*existing.user).clone(),
        };
        if let Err(e) = self.store.save(&stored) {
            warn!(error = %e, "failed to persist refreshed session");
        }

        debug!("access token rotated");
        self.current.store(Some(Arc::new(Credentials {
            access: SecretString::from(stored.access_token),
            refresh: SecretString::from(stored.refresh_token),
            user: Arc::clone(&existing.user),
        })));
        true
    }

    /// Forced logout after the backend rejected the token.
    ///
    /// No-op when nobody is logged in, so a 401 on an anonymous call
    /// does not flag the session as expired.
    pub fn expire(&self) {
        if self.current.swap(None).is_none() {
            return;
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
        warn!("session expired, credentials cleared");
        self.state.send_replace(SessionState::Expired);
    }

    /// Deliberate logout. Always leaves the session anonymous.
    pub fn clear(&self) {
        self.current.store(None);
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
        info!("session cleared");
        self.state.send_replace(SessionState::Anonymous);
    }
}
