//! Shared API client: one request pipeline for every call the console makes.
//!
//! Credentials ride in an HTTP-only cookie; the client never reads its value,
//! it only keeps a cookie jar so the transport attaches it automatically. Any
//! 401 anywhere triggers the single-flight clear-and-redirect sequence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::session::SessionStore;

use super::error::ApiError;

/// Seam for the redirect side effect, so it is injectable and testable.
pub trait Navigator: Send + Sync {
    /// The route currently shown.
    fn current_route(&self) -> String;

    /// Navigate the UI to `route`.
    fn navigate(&self, route: &str);
}

/// Single-flight latch for the 401 clear-and-redirect sequence.
///
/// Process-lifetime: once a 401 wins the race, later 401s from the same dying
/// batch of requests do nothing. [`reset`](Self::reset) is the embedder's duty
/// once navigation has actually completed.
#[derive(Default)]
pub struct UnauthorizedGuard {
    in_progress: AtomicBool,
}

impl UnauthorizedGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to acquire the latch. Returns true for exactly one caller.
    pub fn begin(&self) -> bool {
        !self.in_progress.swap(true, Ordering::SeqCst)
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Re-arm the latch after navigation to the login route has completed.
    pub fn reset(&self) {
        self.in_progress.store(false, Ordering::SeqCst);
    }
}

/// The process-wide API client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_route: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    guard: UnauthorizedGuard,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login_route: config.login_route.clone(),
            session,
            navigator,
            guard: UnauthorizedGuard::new(),
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn guard(&self) -> &UnauthorizedGuard {
        &self.guard
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.http.get(self.url(path))).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.http.post(self.url(path)).json(body)).await
    }

    /// POST without a request body (logout and friends).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.http.post(self.url(path))).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.http.delete(self.url(path))).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.handle_unauthorized().await;
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(ApiError::from_reqwest)
    }

    /// The 401 sequence: clear the session, best-effort ask the server to
    /// drop its cookie, redirect to login. Exactly one of N concurrent 401s
    /// runs this; the rest return immediately.
    pub(crate) async fn handle_unauthorized(&self) {
        if !self.guard.begin() {
            return;
        }

        log::info!("received 401, clearing session and redirecting to login");
        self.session.clear_auth();

        if self.navigator.current_route() != self.login_route {
            // Fire-and-forget: the clear-cookie endpoint needs no auth and we
            // redirect whether or not it answers.
            if let Err(err) = self.http.post(self.url("/auth/clear-cookie")).send().await {
                log::debug!("clear-cookie call failed (ignored): {err}");
            }
            self.navigator.navigate(&self.login_route);
        }
    }
}
