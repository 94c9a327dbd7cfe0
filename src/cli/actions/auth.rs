use crate::{
    cli::globals::GlobalArgs,
    features::auth::{self, Credentials, Portal, Registration, SignInOutcome, Verification},
};
use anyhow::{bail, Result};
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct LoginArgs {
    pub email: String,
    pub password: SecretString,
    pub remember: bool,
}

#[derive(Debug)]
pub struct ResetArgs {
    pub token: String,
    pub password: SecretString,
}

/// # Errors
/// Returns an error if the form is incomplete or the API rejects it.
pub async fn register(args: RegisterArgs, globals: &GlobalArgs) -> Result<()> {
    let client = globals.client(globals.store())?;
    let registration = Registration {
        name: args.name,
        email: args.email,
        password: args.password,
    };

    let message = auth::register(&client, &registration).await?;
    println!("{message}");

    Ok(())
}

/// # Errors
/// Returns an error if the sign-in is rejected or the session cannot be stored.
pub async fn login(args: LoginArgs, globals: &GlobalArgs) -> Result<()> {
    sign_in(Portal::User, args, globals).await
}

/// # Errors
/// Returns an error if the sign-in is rejected or the session cannot be stored.
pub async fn admin_login(args: LoginArgs, globals: &GlobalArgs) -> Result<()> {
    sign_in(Portal::Admin, args, globals).await
}

async fn sign_in(portal: Portal, args: LoginArgs, globals: &GlobalArgs) -> Result<()> {
    let client = globals.client(globals.store())?;
    let credentials = Credentials {
        username: args.email,
        password: args.password,
    };

    let outcome = match portal {
        Portal::User => auth::sign_in(&client, &credentials).await?,
        Portal::Admin => auth::admin_sign_in(&client, &credentials, args.remember).await?,
    };

    match outcome {
        SignInOutcome::SignedIn(identity) => {
            debug!(session_file = %globals.session_file.display(), "Session stored");
            println!("Signed in as {} <{}>", identity.name, identity.email);
            println!("Continue at {}", portal.landing_route());
            Ok(())
        }
        SignInOutcome::Rejected { message, .. } => bail!(message),
    }
}

/// # Errors
/// Returns an error if the token is rejected.
pub async fn verify_email(token: &str, globals: &GlobalArgs) -> Result<()> {
    let client = globals.client(globals.store())?;

    match auth::verify_email(&client, token).await? {
        Verification::Verified => println!("Email verified successfully. You can now sign in."),
        Verification::AlreadyVerified => println!("Email already verified. You can sign in."),
        Verification::Failed { reason } => bail!("Verification failed: {reason}"),
    }

    Ok(())
}

/// # Errors
/// Returns an error if the address is malformed or the API fails.
pub async fn forgot_password(email: &str, globals: &GlobalArgs) -> Result<()> {
    let client = globals.client(globals.store())?;

    let message = auth::forgot_password(&client, email).await?;
    println!("{message}");

    Ok(())
}

/// # Errors
/// Returns an error if the token or password is rejected.
pub async fn reset_password(args: ResetArgs, globals: &GlobalArgs) -> Result<()> {
    let client = globals.client(globals.store())?;

    let message = auth::reset_password(&client, &args.token, &args.password).await?;
    println!("{message}");

    Ok(())
}

/// Clears the stored session; a failed server call only produces a warning.
///
/// # Errors
/// Returns an error if the session file cannot be updated.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let client = globals.client(globals.store())?;

    if !auth::sign_out(&client).await? {
        eprintln!("Warning: the server did not confirm the logout.");
    }
    println!("Signed out");

    Ok(())
}
