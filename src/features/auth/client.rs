use super::{
    types::{
        Credentials, ForgotPasswordRequest, LoginForm, LoginResponse, Portal, RegisterRequest,
        Registration, ResetPasswordRequest, SignInOutcome, Verification,
    },
    validate::{require, require_email, require_password},
};
use crate::{
    api::{ApiClient, ApiError, ApiResponse, StatusPolicy},
    features::Message,
    session::{self, Identity, DEFAULT_DISPLAY_NAME},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

/// Creates an account. The backend emails a verification link.
///
/// # Errors
/// Returns `ApiError::InvalidInput` for incomplete forms, otherwise any API failure.
#[instrument(skip_all, fields(email = %registration.email))]
pub async fn register(client: &ApiClient, registration: &Registration) -> Result<String, ApiError> {
    require(&registration.name, "Please fill in all fields.")?;
    require_email(&registration.email)?;
    require_password(&registration.password)?;

    let request = RegisterRequest {
        name: registration.name.trim(),
        email: registration.email.trim(),
        password: registration.password.expose_secret(),
    };
    let message: Message = client.post_json("/register", &request).await?;

    info!("Registration accepted");
    Ok(message.text_or("Registration successful! Check your email for verification."))
}

/// Signs in a regular user.
///
/// # Errors
/// Returns transport failures, incomplete forms, or session store failures. A
/// rejected sign-in is an `Ok(SignInOutcome::Rejected)`.
pub async fn sign_in(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<SignInOutcome, ApiError> {
    sign_in_at(client, Portal::User, credentials, None).await
}

/// Signs in an administrator and records the remember flag.
///
/// # Errors
/// Same as [`sign_in`].
pub async fn admin_sign_in(
    client: &ApiClient,
    credentials: &Credentials,
    remember: bool,
) -> Result<SignInOutcome, ApiError> {
    sign_in_at(client, Portal::Admin, credentials, Some(remember)).await
}

#[instrument(skip(client, credentials), fields(username = %credentials.username))]
async fn sign_in_at(
    client: &ApiClient,
    portal: Portal,
    credentials: &Credentials,
    remember: Option<bool>,
) -> Result<SignInOutcome, ApiError> {
    let username = credentials.username.trim();
    require(username, "Please fill in all fields.")?;
    require(
        credentials.password.expose_secret(),
        "Please fill in all fields.",
    )?;

    let form = LoginForm {
        username,
        password: credentials.password.expose_secret(),
    };
    let response = client
        .execute(
            client.post(portal.login_path()).form(&form),
            StatusPolicy::Deliver,
        )
        .await?;

    if !response.is_success() {
        let message = portal.rejection_message(&response);
        warn!(status = response.status, "Sign-in rejected");
        return Ok(SignInOutcome::Rejected {
            status: response.status,
            message,
        });
    }

    let body: LoginResponse = response.json()?;
    let identity = Identity {
        name: body
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        email: body
            .email
            .filter(|email| !email.trim().is_empty())
            .unwrap_or_else(|| username.to_string()),
        avatar: None,
    };
    let token = body
        .access_token
        .filter(|token| !token.is_empty())
        .map(SecretString::from);

    session::persist_sign_in(client.store(), token.as_ref(), &identity, remember)?;

    // Set right away so a call issued before the next store read is authorized too.
    if let Some(token) = &token {
        client.set_bearer(Some(token.expose_secret()));
    } else {
        warn!("Sign-in succeeded without an access token");
    }

    info!("Signed in");
    Ok(SignInOutcome::SignedIn(identity))
}

/// Confirms an email verification token.
///
/// # Errors
/// Returns transport failures only; rejected tokens are `Verification::Failed`.
#[instrument(skip_all)]
pub async fn verify_email(client: &ApiClient, token: &str) -> Result<Verification, ApiError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(Verification::Failed {
            reason: "Missing token".to_string(),
        });
    }

    let response = client
        .execute(
            client.get("/verify_email").query(&[("token", token)]),
            StatusPolicy::Deliver,
        )
        .await?;

    Ok(interpret_verification(&response))
}

fn interpret_verification(response: &ApiResponse) -> Verification {
    let note = response
        .detail()
        .or_else(|| response.field("status"))
        .or_else(|| response.field("msg"))
        .unwrap_or_default()
        .to_lowercase();
    let already = ["already verified", "already-verified", "verified already"]
        .iter()
        .any(|phrase| note.contains(phrase));

    if already {
        Verification::AlreadyVerified
    } else if response.is_success() {
        Verification::Verified
    } else {
        Verification::Failed {
            reason: response
                .detail()
                .unwrap_or_else(|| format!("Verification failed (HTTP {}).", response.status)),
        }
    }
}

/// Requests a password reset email. The backend answers the same way whether or not
/// the account exists.
///
/// # Errors
/// Returns `ApiError::InvalidInput` for a malformed address, otherwise any API failure.
#[instrument(skip_all)]
pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<String, ApiError> {
    require_email(email)?;

    let message: Message = client
        .post_json(
            "/forgot_password",
            &ForgotPasswordRequest {
                email: email.trim(),
            },
        )
        .await?;

    Ok(message.text_or("If the account exists, a password reset email will be sent."))
}

/// Completes a password reset with the token from the emailed link.
///
/// # Errors
/// Returns `ApiError::InvalidInput` for a missing token or short password, otherwise
/// any API failure.
#[instrument(skip_all)]
pub async fn reset_password(
    client: &ApiClient,
    token: &str,
    new_password: &SecretString,
) -> Result<String, ApiError> {
    require(token, "Missing reset token.")?;
    require_password(new_password)?;

    let message: Message = client
        .post_json(
            "/reset_password",
            &ResetPasswordRequest {
                token: token.trim(),
                new_password: new_password.expose_secret(),
            },
        )
        .await?;

    Ok(message.text_or("Password reset successfully"))
}

/// Invalidates the session server-side, then clears local state whatever the
/// server said. Returns whether the server acknowledged the logout.
///
/// # Errors
/// Returns an error only if the local session cannot be cleared.
#[instrument(skip_all)]
pub async fn sign_out(client: &ApiClient) -> Result<bool, ApiError> {
    let acknowledged = match client.post_empty("/logout").await {
        Ok(()) => true,
        Err(err) => {
            warn!("Logout failed: {err}");
            false
        }
    };

    session::clear_session(client.store())?;
    client.set_bearer(None);

    info!("Signed out");
    Ok(acknowledged)
}
