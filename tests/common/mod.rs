//! Common test infrastructure
//!
//! Provides a scripted in-process Authentication Service plus constructors
//! for a session manager wired against it. Tests only import from this
//! module.

#![allow(dead_code)] // Not every test binary uses every helper

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use courtbook_core::user::ProfileFields;
use courtbook_core::{
    AuthApi, AuthError, AuthGrant, Credentials, MemoryTokenStore, ProfilePatch, Registration,
    SessionManager, TokenPair, User, UserRole,
};

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

pub fn test_user(role: UserRole) -> User {
    User {
        id: format!("{}-1", role.as_str()),
        name: format!("Test {}", role.as_str()),
        email: format!("{}@example.com", role.as_str()),
        role,
        profile: ProfileFields::default(),
    }
}

pub fn token_pair(n: u32) -> TokenPair {
    TokenPair {
        access_token: format!("at-{n}"),
        refresh_token: format!("rt-{n}"),
    }
}

/// Scripted [`AuthApi`] double. Responses are queued per endpoint; when a
/// queue is empty a sensible default is returned. Refresh calls can be held
/// open so tests can pile up concurrent callers deterministically.
pub struct FakeAuthApi {
    default_user: Mutex<User>,
    login_response: Mutex<Result<AuthGrant, AuthError>>,
    refresh_queue: Mutex<VecDeque<Result<TokenPair, AuthError>>>,
    current_user_queue: Mutex<VecDeque<Result<User, AuthError>>>,
    update_profile_queue: Mutex<VecDeque<Result<User, AuthError>>>,

    login_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    current_user_calls: AtomicUsize,
    update_profile_calls: AtomicUsize,

    hold_refresh: AtomicBool,
    release_tx: watch::Sender<bool>,
    release_rx: watch::Receiver<bool>,
}

impl FakeAuthApi {
    pub fn new() -> Arc<Self> {
        Self::with_user(test_user(UserRole::User))
    }

    pub fn with_user(user: User) -> Arc<Self> {
        let (release_tx, release_rx) = watch::channel(false);
        Arc::new(Self {
            login_response: Mutex::new(Ok(AuthGrant {
                user: user.clone(),
                tokens: token_pair(1),
            })),
            default_user: Mutex::new(user),
            refresh_queue: Mutex::new(VecDeque::new()),
            current_user_queue: Mutex::new(VecDeque::new()),
            update_profile_queue: Mutex::new(VecDeque::new()),
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            current_user_calls: AtomicUsize::new(0),
            update_profile_calls: AtomicUsize::new(0),
            hold_refresh: AtomicBool::new(false),
            release_tx,
            release_rx,
        })
    }

    pub fn set_login(&self, response: Result<AuthGrant, AuthError>) {
        *self.login_response.lock().unwrap() = response;
    }

    pub fn push_refresh(&self, response: Result<TokenPair, AuthError>) {
        self.refresh_queue.lock().unwrap().push_back(response);
    }

    pub fn push_current_user(&self, response: Result<User, AuthError>) {
        self.current_user_queue.lock().unwrap().push_back(response);
    }

    pub fn push_update_profile(&self, response: Result<User, AuthError>) {
        self.update_profile_queue.lock().unwrap().push_back(response);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn current_user_calls(&self) -> usize {
        self.current_user_calls.load(Ordering::SeqCst)
    }

    pub fn update_profile_calls(&self) -> usize {
        self.update_profile_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent refresh calls block until [`release_refresh`](Self::release_refresh).
    pub fn hold_refresh(&self) {
        self.hold_refresh.store(true, Ordering::SeqCst);
    }

    pub fn release_refresh(&self) {
        self.hold_refresh.store(false, Ordering::SeqCst);
        let _ = self.release_tx.send(true);
    }

    async fn wait_if_held(&self) {
        if !self.hold_refresh.load(Ordering::SeqCst) {
            return;
        }
        let mut rx = self.release_rx.clone();
        let _ = rx.wait_for(|released| *released).await;
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_response.lock().unwrap().clone()
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, AuthError> {
        let user = User {
            id: "registered-1".to_string(),
            name: registration.name.clone(),
            email: registration.email.clone(),
            role: registration.role,
            profile: ProfileFields::default(),
        };
        Ok(AuthGrant {
            user,
            tokens: token_pair(1),
        })
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, AuthError> {
        let call = self.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.wait_if_held().await;
        let queued = self.refresh_queue.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| {
            Ok(TokenPair {
                access_token: format!("rotated-at-{call}"),
                refresh_token: format!("rotated-rt-{call}"),
            })
        })
    }

    async fn current_user(&self, _access_token: &str) -> Result<User, AuthError> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.current_user_queue.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(self.default_user.lock().unwrap().clone()))
    }

    async fn update_profile(
        &self,
        _access_token: &str,
        patch: &ProfilePatch,
    ) -> Result<User, AuthError> {
        self.update_profile_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(queued) = self.update_profile_queue.lock().unwrap().pop_front() {
            return queued;
        }
        let mut user = self.default_user.lock().unwrap().clone();
        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        Ok(user)
    }
}

/// Session manager over a fake auth service and an inspectable token store.
pub fn manager_with(api: Arc<FakeAuthApi>, store: Arc<MemoryTokenStore>) -> SessionManager {
    SessionManager::new(api, store)
}

pub fn credentials(email: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: "hunter2".to_string(),
    }
}
