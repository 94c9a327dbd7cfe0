use crate::{
    cli::{
        actions::{
            admin::{BroadcastArgs, UsersArgs},
            auth::{LoginArgs, RegisterArgs, ResetArgs},
            Action,
        },
        commands::{
            account::{
                ARG_EMAIL, ARG_NAME, ARG_PASSWORD, ARG_REMEMBER, ARG_ROUTE, ARG_TOKEN,
                CMD_ADMIN_LOGIN, CMD_FORGOT_PASSWORD, CMD_LOGIN, CMD_LOGOUT, CMD_PROFILE,
                CMD_REGISTER, CMD_RESET_PASSWORD, CMD_STATUS, CMD_VERIFY_EMAIL,
            },
            admin::{
                ARG_MESSAGE, ARG_SEARCH, ARG_STATUS, ARG_SUBJECT, ARG_TEST_EMAIL, CMD_BROADCAST,
                CMD_USERS,
            },
            client::Options,
        },
        globals::GlobalArgs,
    },
    features::admin::UserStatusFilter,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

fn password(matches: &ArgMatches) -> Result<SecretString> {
    required(matches, ARG_PASSWORD).map(SecretString::from)
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<(Action, GlobalArgs)> {
    let options = Options::parse(matches);
    let globals = GlobalArgs::new(options.api_base_url, options.session_file);

    let action = match matches.subcommand() {
        Some((CMD_REGISTER, sub_m)) => Action::Register(RegisterArgs {
            name: required(sub_m, ARG_NAME)?,
            email: required(sub_m, ARG_EMAIL)?,
            password: password(sub_m)?,
        }),
        Some((CMD_LOGIN, sub_m)) => Action::Login(LoginArgs {
            email: required(sub_m, ARG_EMAIL)?,
            password: password(sub_m)?,
            remember: false,
        }),
        Some((CMD_ADMIN_LOGIN, sub_m)) => Action::AdminLogin(LoginArgs {
            email: required(sub_m, ARG_EMAIL)?,
            password: password(sub_m)?,
            remember: sub_m.get_flag(ARG_REMEMBER),
        }),
        Some((CMD_VERIFY_EMAIL, sub_m)) => Action::VerifyEmail {
            token: required(sub_m, ARG_TOKEN)?,
        },
        Some((CMD_FORGOT_PASSWORD, sub_m)) => Action::ForgotPassword {
            email: required(sub_m, ARG_EMAIL)?,
        },
        Some((CMD_RESET_PASSWORD, sub_m)) => Action::ResetPassword(ResetArgs {
            token: required(sub_m, ARG_TOKEN)?,
            password: password(sub_m)?,
        }),
        Some((CMD_LOGOUT, _)) => Action::Logout,
        Some((CMD_PROFILE, sub_m)) => Action::Profile {
            name: required(sub_m, ARG_NAME)?,
        },
        Some((CMD_USERS, sub_m)) => Action::Users(UsersArgs {
            status: required(sub_m, ARG_STATUS)?
                .parse::<UserStatusFilter>()
                .map_err(|e| anyhow!(e))?,
            search: sub_m.get_one::<String>(ARG_SEARCH).cloned(),
        }),
        Some((CMD_BROADCAST, sub_m)) => Action::Broadcast(BroadcastArgs {
            subject: required(sub_m, ARG_SUBJECT)?,
            message: required(sub_m, ARG_MESSAGE)?,
            test_email: sub_m.get_one::<String>(ARG_TEST_EMAIL).cloned(),
        }),
        Some((CMD_STATUS, sub_m)) => Action::Status {
            route: required(sub_m, ARG_ROUTE)?,
        },
        Some((other, _)) => return Err(anyhow!("unknown subcommand: {other}")),
        None => return Err(anyhow!("no subcommand given")),
    };

    Ok((action, globals))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;
    use std::path::PathBuf;

    fn dispatch(args: &[&str]) -> (Action, GlobalArgs) {
        temp_env::with_vars(
            [
                ("BITVA_API_BASE_URL", None::<&str>),
                ("BITVA_SESSION_FILE", Some("/tmp/bitva/session.json")),
                ("BITVA_EMAIL", None),
                ("BITVA_PASSWORD", None),
            ],
            || handler(&commands::new().get_matches_from(args)).unwrap(),
        )
    }

    #[test]
    fn admin_login_carries_remember_flag() {
        let (action, globals) = dispatch(&[
            "bitva",
            "admin-login",
            "-e",
            "root@bitva.io",
            "-p",
            "s3cr3t-pass",
            "--remember",
        ]);

        assert_eq!(globals.session_file, PathBuf::from("/tmp/bitva/session.json"));
        assert!(globals.api_base_url.is_none());
        match action {
            Action::AdminLogin(args) => {
                assert_eq!(args.email, "root@bitva.io");
                assert_eq!(args.password.expose_secret(), "s3cr3t-pass");
                assert!(args.remember);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn users_parses_status_filter() {
        let (action, _) = dispatch(&["bitva", "users", "--status", "unverified"]);
        assert!(matches!(
            action,
            Action::Users(UsersArgs {
                status: UserStatusFilter::Unverified,
                search: None,
            })
        ));

        let (action, _) = dispatch(&["bitva", "users", "-q", "alex"]);
        assert!(matches!(
            action,
            Action::Users(UsersArgs {
                status: UserStatusFilter::All,
                search: Some(ref query),
            }) if query == "alex"
        ));
    }

    #[test]
    fn broadcast_test_email_is_optional() {
        let (action, _) = dispatch(&[
            "bitva",
            "broadcast",
            "--subject",
            "Maintenance",
            "-m",
            "Down at noon",
        ]);
        match action {
            Action::Broadcast(args) => {
                assert_eq!(args.subject, "Maintenance");
                assert!(args.test_email.is_none());
            }
            other => panic!("unexpected action: {other:?}"),
        }

        let (action, _) = dispatch(&[
            "bitva",
            "broadcast",
            "--subject",
            "Maintenance",
            "-m",
            "Down at noon",
            "--test-email",
            "ops@bitva.io",
        ]);
        assert!(matches!(
            action,
            Action::Broadcast(BroadcastArgs {
                test_email: Some(ref email),
                ..
            }) if email == "ops@bitva.io"
        ));
    }

    #[test]
    fn status_defaults_to_dashboard() {
        let (action, _) = dispatch(&["bitva", "status"]);
        assert!(matches!(action, Action::Status { ref route } if route == "/dashboard"));
    }

    #[test]
    fn global_args_after_subcommand() {
        let (_, globals) = dispatch(&[
            "bitva",
            "logout",
            "--api-base-url",
            "https://bitva.io/api",
            "--session-file",
            "/var/tmp/s.json",
        ]);
        assert_eq!(globals.api_base_url.as_deref(), Some("https://bitva.io/api"));
        assert_eq!(globals.session_file, PathBuf::from("/var/tmp/s.json"));
    }
}
