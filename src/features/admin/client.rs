use super::types::{AdminUser, Broadcast, BroadcastRequest, TestBroadcastRequest, UserStatusFilter};
use crate::{
    api::{ApiClient, ApiError, StatusPolicy},
    features::{auth::valid_email, Message},
};
use serde_json::Value;
use tracing::{debug, info, instrument};

const EXPECTED_USERS_SHAPE: &str = "expected { users: [...] }";

/// Shapes the users endpoint may answer with.
enum UsersPayload {
    Envelope(Value),
    Unrecognized(&'static str),
}

impl UsersPayload {
    fn classify(value: Value) -> Self {
        match value {
            Value::Object(mut map) => match map.remove("users") {
                Some(users @ Value::Array(_)) => UsersPayload::Envelope(users),
                Some(_) => UsersPayload::Unrecognized("users is not an array"),
                None => UsersPayload::Unrecognized("object without users"),
            },
            Value::Array(_) => UsersPayload::Unrecognized("bare array"),
            _ => UsersPayload::Unrecognized("not an object"),
        }
    }
}

/// Decodes the user listing. Only the `{ "users": [...] }` envelope is accepted.
///
/// # Errors
/// Returns `ApiError::UnexpectedShape` for any other shape and `ApiError::Parse` when
/// an entry does not decode.
pub fn decode_users(body: Value) -> Result<Vec<AdminUser>, ApiError> {
    match UsersPayload::classify(body) {
        UsersPayload::Envelope(users) => serde_json::from_value(users)
            .map_err(|err| ApiError::Parse(format!("Failed to decode users: {err}"))),
        UsersPayload::Unrecognized(found) => {
            debug!("Rejecting users payload: {found}");
            Err(ApiError::UnexpectedShape(format!(
                "{EXPECTED_USERS_SHAPE}, got {found}"
            )))
        }
    }
}

/// Lists users filtered by status.
///
/// # Errors
/// Returns any API failure or an unexpected response shape.
#[instrument(skip(client))]
pub async fn list_users(
    client: &ApiClient,
    status: UserStatusFilter,
) -> Result<Vec<AdminUser>, ApiError> {
    let path = format!("/admin/users/{}", status.as_str());
    let response = client
        .execute(client.get(&path), StatusPolicy::Raise)
        .await?;
    let users = decode_users(response.json()?)?;

    debug!(count = users.len(), "Loaded users");
    Ok(users)
}

fn require_content(broadcast: &Broadcast) -> Result<(), ApiError> {
    if broadcast.subject.trim().is_empty() || broadcast.message_content.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Subject and message are required.".to_string(),
        ));
    }
    Ok(())
}

/// Sends the broadcast to a single address for review.
///
/// # Errors
/// Returns `ApiError::InvalidInput` for missing content or a malformed address,
/// otherwise any API failure.
#[instrument(skip(client, broadcast))]
pub async fn send_test_broadcast(
    client: &ApiClient,
    email: &str,
    broadcast: &Broadcast,
) -> Result<String, ApiError> {
    require_content(broadcast)?;
    if !valid_email(email.trim()) {
        return Err(ApiError::InvalidInput(
            "Please enter a valid email address.".to_string(),
        ));
    }

    let request = TestBroadcastRequest {
        email: email.trim(),
        subject: broadcast.subject.trim(),
        message_content: &broadcast.message_content,
    };
    let message: Message = client
        .post_json("/admin/send_test_broadcast/", &request)
        .await?;

    info!("Test broadcast sent");
    Ok(message.text_or("Test email sent successfully"))
}

/// Sends the broadcast to every user.
///
/// # Errors
/// Returns `ApiError::InvalidInput` for missing content, otherwise any API failure.
#[instrument(skip_all)]
pub async fn send_broadcast(client: &ApiClient, broadcast: &Broadcast) -> Result<String, ApiError> {
    require_content(broadcast)?;

    let request = BroadcastRequest {
        subject: broadcast.subject.trim(),
        message_content: &broadcast.message_content,
    };
    let message: Message = client.post_json("/admin/send_broadcast/", &request).await?;

    info!("Broadcast sent");
    Ok(message.text_or("Broadcast sent successfully"))
}
