pub mod account;
pub mod admin;
pub mod client;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("bitva")
        .about("Bitva account and admin console client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = account::with_subcommands(command);
    let command = admin::with_subcommands(command);
    let command = client::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "bitva");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Bitva account and admin console client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_command_is_consistent() {
        new().debug_assert();
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars([("BITVA_PASSWORD", None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "bitva",
                "--api-base-url",
                "https://bitva.io/api",
                "login",
                "--email",
                "alex@bitva.io",
                "--password",
                "hunter22",
            ]);

            assert_eq!(
                matches.get_one::<String>(client::ARG_API_BASE_URL).cloned(),
                Some("https://bitva.io/api".to_string())
            );
            let login = matches.subcommand_matches(account::CMD_LOGIN);
            assert_eq!(
                login.and_then(|m| m.get_one::<String>(account::ARG_EMAIL).cloned()),
                Some("alex@bitva.io".to_string())
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("BITVA_API_BASE_URL", Some("https://staging.bitva.io/api")),
                ("BITVA_SESSION_FILE", Some("/tmp/bitva-session.json")),
                ("BITVA_EMAIL", Some("alex@bitva.io")),
                ("BITVA_PASSWORD", Some("hunter22")),
                ("BITVA_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["bitva", "login"]);
                assert_eq!(
                    matches.get_one::<String>(client::ARG_API_BASE_URL).cloned(),
                    Some("https://staging.bitva.io/api".to_string())
                );
                assert_eq!(
                    matches.get_one::<PathBuf>(client::ARG_SESSION_FILE).cloned(),
                    Some(PathBuf::from("/tmp/bitva-session.json"))
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                let login = matches.subcommand_matches(account::CMD_LOGIN);
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(account::ARG_PASSWORD).cloned()),
                    Some("hunter22".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("BITVA_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["bitva", "logout"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("BITVA_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["bitva".to_string(), "logout".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_users_status_is_restricted() {
        let result = new().try_get_matches_from(vec!["bitva", "users", "--status", "banned"]);
        assert!(result.is_err());

        let matches = new().get_matches_from(vec!["bitva", "users"]);
        let users = matches.subcommand_matches(admin::CMD_USERS);
        assert_eq!(
            users.and_then(|m| m.get_one::<String>(admin::ARG_STATUS).cloned()),
            Some("all".to_string())
        );
    }

    #[test]
    fn test_subcommand_required() {
        assert!(new().try_get_matches_from(vec!["bitva"]).is_err());
    }
}
