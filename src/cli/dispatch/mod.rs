//! Command-line argument dispatch.
//!
//! This module maps validated CLI arguments to the action to run, resolving the
//! backend configuration once up front.

use crate::cli::actions::{create, search, shell, Action, SignIn};
use crate::cli::commands::{
    ARG_BACKEND_URL, ARG_PASSWORD, ARG_REGISTER, ARG_TIMEOUT_MS, ARG_USERNAME,
};
use crate::client::{AppConfig, RuntimeConfig};
use crate::features::visitors::DraftVisitor;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let config = AppConfig::load(RuntimeConfig::new(
        matches.get_one::<String>(ARG_BACKEND_URL).map(String::as_str),
        matches.get_one::<u64>(ARG_TIMEOUT_MS).copied(),
    ));

    match matches.subcommand() {
        Some(("search", sub)) => Ok(Action::Search(search::Args {
            config,
            sign_in: sign_in(matches)?,
            query: string_arg(sub, "query"),
        })),
        Some(("create", sub)) => Ok(Action::Create(create::Args {
            config,
            sign_in: sign_in(matches)?,
            draft: DraftVisitor {
                full_name: sub
                    .get_one::<String>("full-name")
                    .cloned()
                    .context("missing required argument: --full-name")?,
                email: string_arg(sub, "email"),
                phone: string_arg(sub, "phone"),
            },
            query: string_arg(sub, "query"),
        })),
        Some(("shell", _)) => Ok(Action::Shell(shell::Args { config })),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}

fn sign_in(matches: &clap::ArgMatches) -> Result<SignIn> {
    let identity = matches
        .get_one::<String>(ARG_USERNAME)
        .cloned()
        .context("missing required argument: --username")?;
    let secret = matches
        .get_one::<String>(ARG_PASSWORD)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --password")?;

    Ok(SignIn {
        identity,
        secret,
        register: matches.get_flag(ARG_REGISTER),
    })
}

fn string_arg(matches: &clap::ArgMatches, name: &str) -> String {
    matches.get_one::<String>(name).cloned().unwrap_or_default()
}
