use crate::features::admin::UserStatusFilter;
use clap::{builder::PossibleValuesParser, Arg, Command};

pub const CMD_USERS: &str = "users";
pub const CMD_BROADCAST: &str = "broadcast";

pub const ARG_STATUS: &str = "status";
pub const ARG_SEARCH: &str = "search";
pub const ARG_SUBJECT: &str = "subject";
pub const ARG_MESSAGE: &str = "message";
pub const ARG_TEST_EMAIL: &str = "test-email";

pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_USERS)
                .about("List users (admin)")
                .arg(
                    Arg::new(ARG_STATUS)
                        .short('s')
                        .long(ARG_STATUS)
                        .help("Filter users by status")
                        .default_value("all")
                        .value_parser(PossibleValuesParser::new(UserStatusFilter::VALUES)),
                )
                .arg(
                    Arg::new(ARG_SEARCH)
                        .short('q')
                        .long(ARG_SEARCH)
                        .help("Only show users whose name or email contains this text"),
                ),
        )
        .subcommand(
            Command::new(CMD_BROADCAST)
                .about("Send a broadcast email to all users (admin)")
                .arg(
                    Arg::new(ARG_SUBJECT)
                        .long(ARG_SUBJECT)
                        .help("Email subject")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_MESSAGE)
                        .short('m')
                        .long(ARG_MESSAGE)
                        .help("Email body")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_TEST_EMAIL)
                        .long(ARG_TEST_EMAIL)
                        .help("Send only a sample to this address"),
                ),
        )
}
