use clap::{Arg, ArgAction, Command};

pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGIN: &str = "login";
pub const CMD_ADMIN_LOGIN: &str = "admin-login";
pub const CMD_VERIFY_EMAIL: &str = "verify-email";
pub const CMD_FORGOT_PASSWORD: &str = "forgot-password";
pub const CMD_RESET_PASSWORD: &str = "reset-password";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_PROFILE: &str = "profile";
pub const CMD_STATUS: &str = "status";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_TOKEN: &str = "token";
pub const ARG_REMEMBER: &str = "remember";
pub const ARG_ROUTE: &str = "route";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long(ARG_EMAIL)
        .help("Account email address")
        .env("BITVA_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("BITVA_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn token_arg(help: &'static str) -> Arg {
    Arg::new(ARG_TOKEN)
        .short('t')
        .long(ARG_TOKEN)
        .help(help)
        .required(true)
}

pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Create an account")
                .arg(
                    Arg::new(ARG_NAME)
                        .short('n')
                        .long(ARG_NAME)
                        .help("Display name")
                        .required(true),
                )
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in and store the session")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_ADMIN_LOGIN)
                .about("Sign in to the admin console")
                .arg(email_arg())
                .arg(password_arg())
                .arg(
                    Arg::new(ARG_REMEMBER)
                        .long(ARG_REMEMBER)
                        .help("Remember this admin sign-in")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new(CMD_VERIFY_EMAIL)
                .about("Confirm an email verification token")
                .arg(token_arg("Verification token from the emailed link")),
        )
        .subcommand(
            Command::new(CMD_FORGOT_PASSWORD)
                .about("Request a password reset email")
                .arg(email_arg()),
        )
        .subcommand(
            Command::new(CMD_RESET_PASSWORD)
                .about("Set a new password with a reset token")
                .arg(token_arg("Reset token from the emailed link"))
                .arg(password_arg().help("New password")),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Sign out and clear the stored session"))
        .subcommand(
            Command::new(CMD_PROFILE)
                .about("Update the display name")
                .arg(
                    Arg::new(ARG_NAME)
                        .short('n')
                        .long(ARG_NAME)
                        .help("New display name")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_STATUS)
                .about("Show the stored session and whether it grants access")
                .arg(
                    Arg::new(ARG_ROUTE)
                        .long(ARG_ROUTE)
                        .help("Protected route to check")
                        .default_value(crate::guard::routes::DASHBOARD),
                ),
        )
}
