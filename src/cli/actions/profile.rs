use crate::{
    cli::{actions::session::require_session, globals::GlobalArgs},
    features::profile,
    guard::routes,
};
use anyhow::Result;

/// # Errors
/// Returns an error if the session is not valid, the name is rejected, or the API fails.
pub async fn execute(name: &str, globals: &GlobalArgs) -> Result<()> {
    let store = globals.store();
    require_session(&globals.guard(store.clone()), routes::PROFILE)?;

    let client = globals.client(store)?;
    let message = profile::update_profile(&client, name).await?;
    println!("{message}");

    Ok(())
}
