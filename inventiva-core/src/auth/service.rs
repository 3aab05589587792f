//! Authentication protocol: login, revalidation, logout and the password /
//! account-activation flows.

use std::sync::Arc;

use serde::Serialize;

use crate::http::{ApiClient, ApiError};
use crate::session::{BootstrapState, SessionBootstrap, SessionStore};

use super::types::{AckResponse, AuthBundle, CompanyListing};

#[derive(Serialize)]
struct LoginRequest {
    email: String,
    password: String,

    #[serde(rename = "codEmpresa")]
    company_code: String,
}

#[derive(Serialize)]
struct SetupPasswordRequest {
    token: String,

    #[serde(rename = "newPassword")]
    new_password: String,
}

#[derive(Serialize)]
struct ResetPasswordRequest {
    token: String,

    #[serde(rename = "newPassword")]
    new_password: String,

    #[serde(rename = "confirmNewPassword")]
    confirm_new_password: String,
}

#[derive(Serialize)]
struct ChangePasswordRequest {
    #[serde(rename = "currentPassword")]
    current_password: String,

    #[serde(rename = "newPassword")]
    new_password: String,

    #[serde(rename = "confirmNewPassword")]
    confirm_new_password: String,
}

#[derive(Serialize)]
struct EmailRequest {
    email: String,
}

/// Emails are matched case-insensitively server-side; normalize before
/// submitting so the credential cache keys stay consistent.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// High-level authentication service owning the API client and the
/// once-per-mount bootstrap latch.
pub struct AuthService {
    client: Arc<ApiClient>,
    bootstrap: SessionBootstrap,
    login_route: String,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>, login_route: impl Into<String>) -> Self {
        Self { client, bootstrap: SessionBootstrap::new(), login_route: login_route.into() }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.client.session()
    }

    pub fn bootstrap_state(&self) -> BootstrapState {
        self.bootstrap.state()
    }

    /// Establish a new session. The server answers with the complete bundle
    /// (identity, context, sectors, permission tree) and `set_auth` runs once
    /// with all of it, so readers never see a permissionless authenticated
    /// state. On failure, [`ApiError::login_message`] yields the form text.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        company_code: &str,
    ) -> Result<(), ApiError> {
        let request = LoginRequest {
            email: normalize_email(email),
            password: password.to_string(),
            company_code: company_code.to_string(),
        };

        let bundle: AuthBundle = self.client.post("/auth/login", &request).await?;
        log::info!(
            "login ok: user={} company={} sector={}",
            bundle.user.email,
            bundle.company.code,
            bundle.sector.code
        );
        self.session().set_auth(bundle);
        Ok(())
    }

    /// Mount-time revalidation of a persisted session (see
    /// [`SessionBootstrap`]). Runs at most once per process mount.
    pub async fn revalidate(&self, current_route: &str) -> BootstrapState {
        self.bootstrap
            .run(self.session(), current_route, &self.login_route, || self.who_am_i())
            .await
    }

    /// Ask the server who the cookie belongs to.
    pub async fn who_am_i(&self) -> Result<AuthBundle, ApiError> {
        self.client.get("/auth/me").await
    }

    /// End this device's session. Server notification is best-effort; the
    /// local session is cleared regardless.
    pub async fn logout(&self) {
        if let Err(err) = self.client.post_empty::<AckResponse>("/auth/logout").await {
            log::debug!("logout call failed (session cleared anyway): {err}");
        }
        self.session().clear_auth();
    }

    /// End the user's sessions on every device.
    pub async fn logout_all(&self) {
        if let Err(err) = self.client.post_empty::<AckResponse>("/auth/logout-all").await {
            log::debug!("logout-all call failed (session cleared anyway): {err}");
        }
        self.session().clear_auth();
    }

    /// Companies offered on the login screen. Needs no credential.
    pub async fn companies(&self) -> Result<Vec<CompanyListing>, ApiError> {
        self.client.get("/empresas").await
    }

    // --- password / activation flows ---

    /// Set the initial password from an activation token.
    pub async fn setup_password(&self, token: &str, password: &str) -> Result<AckResponse, ApiError> {
        let request =
            SetupPasswordRequest { token: token.to_string(), new_password: password.to_string() };
        self.client.post("/auth/set-password", &request).await
    }

    /// Request a password-reset email.
    pub async fn forgot_password(&self, email: &str) -> Result<AckResponse, ApiError> {
        self.client.post("/auth/forgot-password", &EmailRequest { email: normalize_email(email) }).await
    }

    /// Reset the password with an emailed token.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> Result<AckResponse, ApiError> {
        let request = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
            confirm_new_password: confirm_new_password.to_string(),
        };
        self.client.post("/auth/reset-password", &request).await
    }

    /// Change the password of the logged-in user.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> Result<AckResponse, ApiError> {
        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
            confirm_new_password: confirm_new_password.to_string(),
        };
        self.client.post("/auth/change-password", &request).await
    }

    /// Re-send the activation email for a user (admin-only endpoint).
    pub async fn resend_activation(&self, email: &str) -> Result<AckResponse, ApiError> {
        self.client
            .post("/auth/admin/resend-setup", &EmailRequest { email: normalize_email(email) })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana@Pirapo.COOP.py "), "ana@pirapo.coop.py");
        assert_eq!(normalize_email("ok@ok.ok"), "ok@ok.ok");
    }

    #[test]
    fn login_request_uses_wire_field_names() {
        let request = LoginRequest {
            email: "ana@pirapo.coop.py".into(),
            password: "secret".into(),
            company_code: "01".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["codEmpresa"], "01");
        assert!(value.get("company_code").is_none());
    }

    #[test]
    fn password_requests_use_wire_field_names() {
        let reset = ResetPasswordRequest {
            token: "t".into(),
            new_password: "a".into(),
            confirm_new_password: "a".into(),
        };
        let value = serde_json::to_value(&reset).unwrap();
        assert!(value.get("newPassword").is_some());
        assert!(value.get("confirmNewPassword").is_some());

        let change = ChangePasswordRequest {
            current_password: "x".into(),
            new_password: "y".into(),
            confirm_new_password: "y".into(),
        };
        let value = serde_json::to_value(&change).unwrap();
        assert!(value.get("currentPassword").is_some());
    }
}
