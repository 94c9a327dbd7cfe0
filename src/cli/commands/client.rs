use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_SESSION_FILE: &str = "session-file";

const SESSION_DIR: &str = ".bitva";
const SESSION_FILE: &str = "session.json";

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("API base URL, example: https://bitva.io/api")
                .env("BITVA_API_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Where the session (access token and profile) is stored")
                .long_help(
                    "Where the session (access token and profile) is stored. \
                     Defaults to $HOME/.bitva/session.json.",
                )
                .env("BITVA_SESSION_FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
}

#[derive(Debug, Clone)]
pub struct Options {
    pub api_base_url: Option<String>,
    pub session_file: PathBuf,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            api_base_url: matches.get_one::<String>(ARG_API_BASE_URL).cloned(),
            session_file: matches
                .get_one::<PathBuf>(ARG_SESSION_FILE)
                .cloned()
                .unwrap_or_else(default_session_file),
        }
    }
}

/// `$HOME/.bitva/session.json`, or `.bitva/session.json` under the working directory.
#[must_use]
pub fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map_or_else(|| PathBuf::from(SESSION_DIR), |home| PathBuf::from(home).join(SESSION_DIR))
        .join(SESSION_FILE)
}
