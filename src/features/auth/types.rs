//! Request and response types for auth calls. Password-bearing types keep the secret
//! wrapped; request bodies borrow it only while the request is built.

use crate::{api::ApiResponse, guard::routes, session::Identity};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Which sign-in endpoint to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Portal {
    User,
    Admin,
}

impl Portal {
    #[must_use]
    pub const fn login_path(self) -> &'static str {
        match self {
            Portal::User => "/login",
            Portal::Admin => "/admin/login",
        }
    }

    /// Where a successful sign-in lands.
    #[must_use]
    pub const fn landing_route(self) -> &'static str {
        match self {
            Portal::User => routes::DASHBOARD,
            Portal::Admin => routes::ADMIN_DASHBOARD,
        }
    }

    /// Inline message for a rejected sign-in.
    #[must_use]
    pub fn rejection_message(self, response: &ApiResponse) -> String {
        let detail = response
            .detail()
            .unwrap_or_else(|| format!("Login failed (HTTP {}).", response.status));

        match (self, response.status) {
            (_, 401) => "Invalid email or password.".to_string(),
            (Portal::User, 403) if detail.to_lowercase().contains("verify") => {
                "Please verify your email before logging in.".to_string()
            }
            (Portal::Admin, 403) => "Access denied. Admins only.".to_string(),
            _ => detail,
        }
    }
}

pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(super) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(super) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub(super) struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(Identity),
    Rejected { status: u16, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Verified,
    AlreadyVerified,
    Failed { reason: String },
}
