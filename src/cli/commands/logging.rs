//! Log verbosity. `-v` counts and `VISITOR_PASS_LOG_LEVEL` index the same table:
//! no flag keeps errors only, each `-v` adds one level of detail.

use clap::{builder::ValueParser, Arg, ArgAction, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

/// Reads a level name, or tracing's numeric form (1 = error .. 5 = trace), as a
/// verbosity count.
fn parse_level(value: &str) -> Result<u8, String> {
    let level: Level = value.trim().parse().map_err(|_| {
        format!("invalid log level '{value}': expected error, warn, info, debug or trace")
    })?;

    LEVELS
        .iter()
        .position(|candidate| *candidate == level)
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("unsupported log level '{value}'"))
}

/// Level enabled for a verbosity count; `None` keeps the subscriber default.
#[must_use]
pub fn level_for(count: u8) -> Option<Level> {
    match usize::from(count) {
        0 => None,
        index => Some(LEVELS[index.min(LEVELS.len() - 1)]),
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more to stderr: -v warn, -vv info, -vvv debug, -vvvv trace")
            .env("VISITOR_PASS_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_level)),
    )
}
