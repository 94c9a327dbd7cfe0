use crate::{
    cli::{actions::session::require_session, globals::GlobalArgs},
    features::admin::{self, AdminUser, Broadcast, UserStatusFilter},
    guard::routes,
};
use anyhow::Result;

#[derive(Debug)]
pub struct UsersArgs {
    pub status: UserStatusFilter,
    pub search: Option<String>,
}

#[derive(Debug)]
pub struct BroadcastArgs {
    pub subject: String,
    pub message: String,
    pub test_email: Option<String>,
}

/// # Errors
/// Returns an error if the session is not valid or the API fails.
pub async fn users(args: UsersArgs, globals: &GlobalArgs) -> Result<()> {
    let store = globals.store();
    require_session(&globals.guard(store.clone()), routes::ADMIN_DASHBOARD)?;

    let client = globals.client(store)?;
    let users = admin::list_users(&client, args.status).await?;
    let users = filter_users(users, args.search.as_deref());

    if users.is_empty() {
        println!("No matching users");
        return Ok(());
    }
    for user in &users {
        println!("{}", format_user(user));
    }

    Ok(())
}

fn filter_users(users: Vec<AdminUser>, search: Option<&str>) -> Vec<AdminUser> {
    match search {
        Some(query) => users.into_iter().filter(|user| user.matches(query)).collect(),
        None => users,
    }
}

fn format_user(user: &AdminUser) -> String {
    let verified = if user.is_verified {
        "verified"
    } else {
        "unverified"
    };
    match user.is_active {
        Some(false) => format!("{}\t{}\t{verified}\tinactive", user.email, user.name),
        _ => format!("{}\t{}\t{verified}", user.email, user.name),
    }
}

/// # Errors
/// Returns an error if the session is not valid, the content is incomplete, or the API fails.
pub async fn broadcast(args: BroadcastArgs, globals: &GlobalArgs) -> Result<()> {
    let store = globals.store();
    require_session(&globals.guard(store.clone()), routes::ADMIN_BROADCAST)?;

    let client = globals.client(store)?;
    let broadcast = Broadcast {
        subject: args.subject,
        message_content: args.message,
    };

    let message = match args.test_email.as_deref() {
        Some(email) => admin::send_test_broadcast(&client, email, &broadcast).await?,
        None => admin::send_broadcast(&client, &broadcast).await?,
    };
    println!("{message}");

    Ok(())
}
