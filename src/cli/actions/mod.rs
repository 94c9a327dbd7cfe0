pub mod admin;
pub mod auth;
pub mod profile;
pub mod session;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Register(auth::RegisterArgs),
    Login(auth::LoginArgs),
    AdminLogin(auth::LoginArgs),
    VerifyEmail { token: String },
    ForgotPassword { email: String },
    ResetPassword(auth::ResetArgs),
    Logout,
    Profile { name: String },
    Users(admin::UsersArgs),
    Broadcast(admin::BroadcastArgs),
    Status { route: String },
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails or the session does not grant access.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
