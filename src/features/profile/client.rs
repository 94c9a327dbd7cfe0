//! Profile editing for the signed-in user. Only the display name is editable; the
//! stored copy is replaced once the API accepts the change.

use super::types::UpdateProfileRequest;
use crate::{
    api::{ApiClient, ApiError},
    features::Message,
    session::SessionKey,
};
use tracing::{info, instrument};

/// Updates the display name.
///
/// # Errors
/// Returns `ApiError::InvalidInput` for a blank or unchanged name, otherwise any API
/// or session store failure.
#[instrument(skip(client))]
pub async fn update_profile(client: &ApiClient, name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput("Name cannot be empty.".to_string()));
    }
    if client.store().get(SessionKey::Name).as_deref().map(str::trim) == Some(name) {
        return Err(ApiError::InvalidInput("Name is unchanged.".to_string()));
    }

    let message: Message = client
        .post_json("/update_profile", &UpdateProfileRequest { name })
        .await?;

    client.store().set(SessionKey::Name, name)?;

    info!("Profile updated");
    Ok(message.text_or("Profile updated successfully!"))
}
