//! The authenticated session.
//!
//! [`SessionStore`] is the only state shared across views.  Every
//! authenticated request reads its token; only [`SessionStore::login`],
//! [`SessionStore::register`] and [`SessionStore::logout`] write it.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::client::MincaClient;
use crate::error::{Error, Result};
use crate::storage::{AUTH_STORAGE_KEY, KeyValueStore, get_json, set_json};
use crate::types::{AuthResponse, LoginRequest, SignupRequest, User};

/// Surfaced when a failed login carries no message.
pub const LOGIN_FAILED: &str = "Login failed";

/// Surfaced when a failed registration carries no message.
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// The persisted subset of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub token: Option<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    token: Option<String>,
    is_loading: bool,
    is_authenticated: bool,
}

impl SessionState {
    fn persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            is_authenticated: self.is_authenticated,
            token: self.token.clone(),
        }
    }
}

/// Authenticated user, bearer token, and the loading/authenticated flags.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Creates an empty, unauthenticated session backed by `storage`.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
        }
    }

    /// Restores the session persisted in `storage`.
    ///
    /// A missing or unreadable entry yields an unauthenticated session.
    pub fn hydrate(storage: Arc<dyn KeyValueStore>) -> Self {
        let store = Self::new(storage);
        match get_json::<PersistedSession>(store.storage.as_ref(), AUTH_STORAGE_KEY) {
            Ok(Some(persisted)) => {
                if let Ok(mut state) = store.state.write() {
                    state.user = persisted.user;
                    state.token = persisted.token;
                    state.is_authenticated = persisted.is_authenticated;
                }
                tracing::debug!("restored persisted session");
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable persisted session");
            }
        }
        store
    }

    /// Bearer token for authenticated requests.
    pub fn token(&self) -> Option<String> {
        self.read().ok().and_then(|state| state.token.clone())
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<User> {
        self.read().ok().and_then(|state| state.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().map(|state| state.is_authenticated).unwrap_or(false)
    }

    /// True while a login or registration is in flight.
    pub fn is_loading(&self) -> bool {
        self.read().map(|state| state.is_loading).unwrap_or(false)
    }

    /// Signs in with email and password.
    ///
    /// On failure the backend's message is surfaced, or [`LOGIN_FAILED`].
    pub async fn login(&self, client: &MincaClient, email: &str, password: &str) -> Result<User> {
        self.set_loading(true)?;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate(client.login(&request).await, LOGIN_FAILED)
    }

    /// Creates an account and signs in.
    ///
    /// On failure the backend's message is surfaced, or [`REGISTRATION_FAILED`].
    pub async fn register(
        &self,
        client: &MincaClient,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User> {
        self.set_loading(true)?;
        let request = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate(client.signup(&request).await, REGISTRATION_FAILED)
    }

    /// Clears the user and the authenticated flag.
    ///
    /// The token is cleared as well.
    pub fn logout(&self) -> Result<()> {
        let persisted = {
            let mut state = self.write()?;
            state.user = None;
            state.token = None;
            state.is_authenticated = false;
            state.persisted()
        };
        set_json(self.storage.as_ref(), AUTH_STORAGE_KEY, &persisted)?;
        tracing::info!("signed out");
        Ok(())
    }

    fn authenticate(&self, outcome: Result<AuthResponse>, fallback: &str) -> Result<User> {
        match outcome {
            Ok(response) => {
                let persisted = {
                    let mut state = self.write()?;
                    state.user = Some(response.user.clone());
                    state.token = Some(response.token);
                    state.is_authenticated = true;
                    state.is_loading = false;
                    state.persisted()
                };
                set_json(self.storage.as_ref(), AUTH_STORAGE_KEY, &persisted)?;
                tracing::info!(user = %response.user.username, "signed in");
                Ok(response.user)
            }
            Err(err) => {
                self.set_loading(false)?;
                tracing::warn!(error = %err, "authentication failed");
                Err(with_fallback_message(err, fallback))
            }
        }
    }

    fn set_loading(&self, loading: bool) -> Result<()> {
        self.write()?.is_loading = loading;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SessionState>> {
        self.state
            .read()
            .map_err(|_| Error::storage("session lock poisoned", None))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionState>> {
        self.state
            .write()
            .map_err(|_| Error::storage("session lock poisoned", None))
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user())
            .field("is_authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

fn with_fallback_message(err: Error, fallback: &str) -> Error {
    let fallback = fallback.to_string();
    match err {
        Error::Connection { source, .. } => Error::Connection {
            message: fallback,
            source,
        },
        Error::Timeout { duration, .. } => Error::Timeout {
            message: fallback,
            duration,
        },
        Error::HttpClient { source, .. } => Error::HttpClient {
            message: fallback,
            source,
        },
        err if err.user_message() != crate::error::GENERIC_FAILURE_MESSAGE => err,
        Error::Authentication { .. } => Error::authentication(fallback),
        Error::Permission { .. } => Error::permission(fallback),
        Error::NotFound { resource, .. } => Error::not_found(fallback, resource),
        Error::BadRequest { .. } => Error::bad_request(fallback),
        Error::InternalServer { .. } => Error::internal_server(fallback),
        Error::ServiceUnavailable { .. } => Error::service_unavailable(fallback),
        Error::Api { status_code, .. } => Error::api(status_code, fallback),
        other => other,
    }
}
