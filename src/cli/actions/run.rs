use crate::cli::{
    actions::{admin, auth, profile, session, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Register(args) => auth::register(args, globals).await,
        Action::Login(args) => auth::login(args, globals).await,
        Action::AdminLogin(args) => auth::admin_login(args, globals).await,
        Action::VerifyEmail { token } => auth::verify_email(&token, globals).await,
        Action::ForgotPassword { email } => auth::forgot_password(&email, globals).await,
        Action::ResetPassword(args) => auth::reset_password(args, globals).await,
        Action::Logout => auth::logout(globals).await,
        Action::Profile { name } => profile::execute(&name, globals).await,
        Action::Users(args) => admin::users(args, globals).await,
        Action::Broadcast(args) => admin::broadcast(args, globals).await,
        Action::Status { route } => session::status(&route, globals),
    }
}
