//! Session lifecycle management.
//!
//! Owns the authentication state machine: credential exchange, access/refresh
//! token rotation with single-flight de-duplication, and role-derived routing
//! decisions. All mutation of session state goes through this type.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::routes::{dashboard_route_for, LOGIN_ROUTE};
use super::token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::auth_api::{
    AuthApi, AuthError, Credentials, HttpAuthApi, ProfilePatch, Registration, TokenPair,
};
use crate::config::CoreConfig;
use crate::user::{Permission, User, UserRole};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Refreshing,
    Failed,
}

/// The authoritative authentication record.
///
/// Invariant: `status == Authenticated` exactly when both an access token and
/// a user are present.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
    pub permissions: Vec<Permission>,
    pub status: SessionStatus,
}

/// Result of a successful login: the account plus the role-derived dashboard
/// path the UI should navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: User,
    pub redirect_path: &'static str,
}

type SharedRefresh = Shared<BoxFuture<'static, Result<TokenPair, AuthError>>>;

/// Owner of the session state. Cheap to clone; all clones share one state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
    /// The one in-flight refresh, if any. Late callers clone the shared
    /// future instead of issuing a second network call.
    refresh_slot: Mutex<Option<SharedRefresh>>,
    /// Bumped on every logout. A refresh result is applied only if the epoch
    /// it captured is still current, so a late response cannot resurrect a
    /// cleared session.
    epoch: AtomicU64,
    status_tx: watch::Sender<SessionStatus>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Anonymous);
        Self {
            inner: Arc::new(Inner {
                api,
                tokens,
                state: RwLock::new(SessionState::default()),
                refresh_slot: Mutex::new(None),
                epoch: AtomicU64::new(0),
                status_tx,
            }),
        }
    }

    /// Production wiring: HTTP auth client plus a file-backed token store if
    /// the config names one.
    pub fn with_http_api(config: &CoreConfig) -> anyhow::Result<Self> {
        let api = Arc::new(HttpAuthApi::new(config)?);
        let tokens: Arc<dyn TokenStore> = match &config.token_file {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        Ok(Self::new(api, tokens))
    }

    /// Exchange credentials for a session.
    ///
    /// On success both tokens are stored durably and the role-derived
    /// dashboard path is returned. On failure previously-stored tokens are
    /// left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, AuthError> {
        self.inner.set_status(SessionStatus::Authenticating);
        match self.inner.api.login(credentials).await {
            Ok(grant) => {
                let redirect_path = dashboard_route_for(grant.user.role);
                self.install_session(grant.user.clone(), grant.tokens);
                info!(user_id = %grant.user.id, role = grant.user.role.as_str(), "login succeeded");
                Ok(LoginOutcome {
                    user: grant.user,
                    redirect_path,
                })
            }
            Err(err) => {
                debug!("login failed: {}", err);
                self.inner.set_status(SessionStatus::Failed);
                Err(err)
            }
        }
    }

    /// Create an account. Same token-storage contract as [`login`](Self::login).
    pub async fn register(&self, registration: &Registration) -> Result<User, AuthError> {
        self.inner.set_status(SessionStatus::Authenticating);
        match self.inner.api.register(registration).await {
            Ok(grant) => {
                self.install_session(grant.user.clone(), grant.tokens);
                info!(user_id = %grant.user.id, "registration succeeded");
                Ok(grant.user)
            }
            Err(err) => {
                debug!("registration failed: {}", err);
                self.inner.set_status(SessionStatus::Failed);
                Err(err)
            }
        }
    }

    /// Clear the session: in-memory state, durable tokens, and any interest
    /// in a refresh still in flight. Never fails; store errors are logged.
    pub fn logout(&self) {
        Inner::clear_session(&self.inner);
        info!("logged out");
    }

    /// Restore a session from durably stored tokens, validating them against
    /// the Authentication Service. Returns `Ok(None)` when there is nothing
    /// to restore or the stored tokens are rejected.
    pub async fn bootstrap(&self) -> Result<Option<User>, AuthError> {
        let pair = match self.inner.tokens.load() {
            Ok(Some(pair)) => pair,
            Ok(None) => return Ok(None),
            Err(err) => {
                warn!("failed to read durable tokens: {:#}", err);
                return Ok(None);
            }
        };

        {
            let mut state = self.inner.state.write().unwrap();
            state.access_token = Some(pair.access_token.clone());
            state.refresh_token = Some(pair.refresh_token.clone());
            state.status = SessionStatus::Authenticating;
        }
        let _ = self.inner.status_tx.send(SessionStatus::Authenticating);

        let user = match self.inner.api.current_user(&pair.access_token).await {
            Ok(user) => user,
            Err(AuthError::TokenExpired) => {
                // Stored access token is stale; one refresh attempt with the
                // stored refresh token.
                match self.refresh_access_token().await {
                    Ok(fresh) => match self.inner.api.current_user(&fresh).await {
                        Ok(user) => user,
                        Err(err) if err.is_authorization() => {
                            Inner::clear_session(&self.inner);
                            return Ok(None);
                        }
                        Err(err) => {
                            Inner::reset_memory(&self.inner);
                            return Err(err);
                        }
                    },
                    Err(AuthError::Network(message)) => {
                        Inner::reset_memory(&self.inner);
                        return Err(AuthError::Network(message));
                    }
                    Err(err) => {
                        // Authorization failure already cleared the session.
                        debug!("bootstrap refresh rejected: {}", err);
                        return Ok(None);
                    }
                }
            }
            Err(err) if err.is_authorization() => {
                info!("stored tokens rejected, starting anonymous");
                Inner::clear_session(&self.inner);
                return Ok(None);
            }
            Err(err) => {
                Inner::reset_memory(&self.inner);
                return Err(err);
            }
        };

        self.finalize_user(user.clone());
        info!(user_id = %user.id, "session restored from durable tokens");
        Ok(Some(user))
    }

    /// Obtain a fresh access token.
    ///
    /// Single-flight: if a refresh is already in progress all callers attach
    /// to it and observe the same outcome; exactly one network call is made.
    /// Both tokens rotate atomically. An authorization failure clears the
    /// session and surfaces [`AuthError::RefreshFailed`].
    pub async fn refresh_access_token(&self) -> Result<String, AuthError> {
        let shared = {
            let mut slot = self.inner.refresh_slot.lock().unwrap();
            match slot.as_ref() {
                Some(pending) => {
                    debug!("refresh already in flight, attaching");
                    pending.clone()
                }
                None => {
                    let inner = Arc::clone(&self.inner);
                    let epoch = inner.epoch.load(Ordering::SeqCst);
                    let pending: SharedRefresh = Inner::run_refresh(inner, epoch).boxed().shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };
        shared.await.map(|pair| pair.access_token)
    }

    /// Apply a profile patch.
    ///
    /// On a stale-token rejection the manager performs exactly one refresh
    /// and retries the update once; a second failure is surfaced rather than
    /// retried again.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<User, AuthError> {
        let token = self.access_token().ok_or(AuthError::TokenExpired)?;
        match self.inner.api.update_profile(&token, patch).await {
            Ok(user) => {
                self.replace_user(user.clone());
                Ok(user)
            }
            Err(AuthError::TokenExpired) => {
                debug!("profile update hit a stale token, refreshing once");
                let fresh = self.refresh_access_token().await?;
                let user = self.inner.api.update_profile(&fresh, patch).await?;
                self.replace_user(user.clone());
                Ok(user)
            }
            Err(err) => Err(err),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.state.read().unwrap().status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.read().unwrap().user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.state.read().unwrap().access_token.clone()
    }

    /// Copy of the full session state, for diagnostics and tests.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.read().unwrap().clone()
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.inner
            .state
            .read()
            .unwrap()
            .user
            .as_ref()
            .map(|user| user.role == role)
            .unwrap_or(false)
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.inner
            .state
            .read()
            .unwrap()
            .permissions
            .contains(&permission)
    }

    /// Dashboard path for the current role; the entry route when the session
    /// is not authenticated.
    pub fn dashboard_route(&self) -> &'static str {
        let state = self.inner.state.read().unwrap();
        if state.status != SessionStatus::Authenticated {
            return LOGIN_ROUTE;
        }
        state
            .user
            .as_ref()
            .map(|user| dashboard_route_for(user.role))
            .unwrap_or(LOGIN_ROUTE)
    }

    /// Status channel for the UI layer; logout and refresh transitions are
    /// published here.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status_tx.subscribe()
    }

    fn install_session(&self, user: User, tokens: TokenPair) {
        if let Err(err) = self.inner.tokens.store(&tokens) {
            warn!("failed to persist tokens: {:#}", err);
        }
        {
            let mut state = self.inner.state.write().unwrap();
            state.access_token = Some(tokens.access_token);
            state.refresh_token = Some(tokens.refresh_token);
            state.permissions = user.role.permissions().to_vec();
            state.user = Some(user);
            state.status = SessionStatus::Authenticated;
        }
        let _ = self.inner.status_tx.send(SessionStatus::Authenticated);
    }

    fn finalize_user(&self, user: User) {
        {
            let mut state = self.inner.state.write().unwrap();
            state.permissions = user.role.permissions().to_vec();
            state.user = Some(user);
            state.status = SessionStatus::Authenticated;
        }
        let _ = self.inner.status_tx.send(SessionStatus::Authenticated);
    }

    fn replace_user(&self, user: User) {
        let mut state = self.inner.state.write().unwrap();
        // A logout that raced the update wins; do not resurrect the user.
        if state.user.is_some() {
            state.permissions = user.role.permissions().to_vec();
            state.user = Some(user);
        }
    }
}

impl Inner {
    fn set_status(&self, status: SessionStatus) {
        self.state.write().unwrap().status = status;
        let _ = self.status_tx.send(status);
    }

    fn clear_session(inner: &Inner) {
        inner.epoch.fetch_add(1, Ordering::SeqCst);
        if let Err(err) = inner.tokens.clear() {
            warn!("failed to clear durable tokens: {:#}", err);
        }
        *inner.state.write().unwrap() = SessionState::default();
        let _ = inner.status_tx.send(SessionStatus::Anonymous);
    }

    /// Reset in-memory state without touching the durable store. Used when a
    /// transient network failure interrupts bootstrap.
    fn reset_memory(inner: &Inner) {
        *inner.state.write().unwrap() = SessionState::default();
        let _ = inner.status_tx.send(SessionStatus::Anonymous);
    }

    /// The single in-flight refresh. Clears the slot when done so the next
    /// call starts fresh.
    async fn run_refresh(inner: Arc<Inner>, epoch: u64) -> Result<TokenPair, AuthError> {
        let result = Self::do_refresh(&inner, epoch).await;
        *inner.refresh_slot.lock().unwrap() = None;
        result
    }

    async fn do_refresh(inner: &Arc<Inner>, epoch: u64) -> Result<TokenPair, AuthError> {
        let refresh_token = inner.state.read().unwrap().refresh_token.clone();
        let Some(refresh_token) = refresh_token else {
            return Err(AuthError::RefreshFailed("no refresh token held".into()));
        };

        let status = {
            let mut state = inner.state.write().unwrap();
            if state.status == SessionStatus::Authenticated {
                state.status = SessionStatus::Refreshing;
            }
            state.status
        };
        let _ = inner.status_tx.send(status);

        match inner.api.refresh(&refresh_token).await {
            Ok(pair) => {
                if inner.epoch.load(Ordering::SeqCst) != epoch {
                    debug!("refresh completed after logout, not applying");
                    return Ok(pair);
                }
                if let Err(err) = inner.tokens.store(&pair) {
                    warn!("failed to persist rotated tokens: {:#}", err);
                }
                let status = {
                    let mut state = inner.state.write().unwrap();
                    state.access_token = Some(pair.access_token.clone());
                    state.refresh_token = Some(pair.refresh_token.clone());
                    if state.user.is_some() {
                        state.status = SessionStatus::Authenticated;
                    }
                    state.status
                };
                let _ = inner.status_tx.send(status);
                debug!("token pair rotated");
                Ok(pair)
            }
            Err(err) => {
                if inner.epoch.load(Ordering::SeqCst) != epoch {
                    debug!("refresh failed after logout, dropping result");
                    return Err(err);
                }
                if err.is_authorization() {
                    info!("refresh rejected, clearing session: {}", err);
                    Self::clear_session(inner);
                    let reason = match err {
                        AuthError::RefreshFailed(message) => message,
                        other => other.to_string(),
                    };
                    Err(AuthError::RefreshFailed(reason))
                } else {
                    // Transient failure; the session keeps its current tokens.
                    let status = {
                        let mut state = inner.state.write().unwrap();
                        if state.status == SessionStatus::Refreshing {
                            state.status = SessionStatus::Authenticated;
                        }
                        state.status
                    };
                    let _ = inner.status_tx.send(status);
                    Err(err)
                }
            }
        }
    }
}
