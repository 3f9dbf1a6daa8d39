pub mod logging;

use crate::features::auth::{DEMO_IDENTITY, DEMO_SECRET};
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_BACKEND_URL: &str = "backend-url";
pub const ARG_TIMEOUT_MS: &str = "timeout-ms";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_REGISTER: &str = "register";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::client::GIT_COMMIT_HASH)
            .into_boxed_str(),
    );

    let command = Command::new("visitor-pass")
        .about("Visitor pass registration client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new(ARG_BACKEND_URL)
                .long("backend-url")
                .help("Backend origin, example: https://visitors.example.com (empty: same origin)")
                .env("VISITOR_PASS_BACKEND_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT_MS)
                .long("timeout-ms")
                .help("Request timeout in milliseconds")
                .env("VISITOR_PASS_TIMEOUT_MS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long("username")
                .help("Operator email used to sign in")
                .env("VISITOR_PASS_USERNAME")
                .default_value(DEMO_IDENTITY)
                .global(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long("password")
                .help("Operator password (default: the demo operator's)")
                .env("VISITOR_PASS_PASSWORD")
                .default_value(DEMO_SECRET)
                .hide_default_value(true)
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_REGISTER)
                .long("register")
                .help("Register a new operator instead of logging in")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("search")
                .about("Sign in and list visitors, optionally filtered")
                .arg(
                    Arg::new("query")
                        .help("Free-text filter on name or contact fields")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Sign in and register a visitor")
                .arg(
                    Arg::new("full-name")
                        .long("full-name")
                        .help("Visitor full name")
                        .required(true),
                )
                .arg(Arg::new("email").long("email").help("Visitor email").default_value(""))
                .arg(Arg::new("phone").long("phone").help("Visitor phone").default_value(""))
                .arg(
                    Arg::new("query")
                        .long("query")
                        .help("Filter applied to the listing after the visitor is created")
                        .default_value(""),
                ),
        )
        .subcommand(Command::new("shell").about("Interactive session kept in memory"));

    logging::with_args(command)
}
