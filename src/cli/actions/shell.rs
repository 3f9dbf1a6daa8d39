use crate::{
    app::App,
    client::{AppConfig, GIT_COMMIT_HASH},
    features::{
        auth::{DEMO_IDENTITY, DEMO_SECRET},
        visitors::DraftVisitor,
    },
    views::{alert, AlertKind},
};
use anyhow::Result;
use secrecy::SecretString;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  login [<email> <password>]    sign in; without arguments uses the demo operator
  register <email> <password>   create an account and sign in
  search [text]                 list visitors, filtered by text when given
  name|email|phone [value]      edit the new visitor draft
  create                        submit the draft and reload the list
  show                          print the current screen
  help                          this message
  quit                          leave the shell";

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
}

/// One parsed shell line.
#[derive(Debug)]
enum ShellCommand {
    Login { identity: String, secret: SecretString },
    Register { identity: String, secret: SecretString },
    Search(String),
    Name(String),
    Email(String),
    Phone(String),
    Create,
    Show,
    Help,
    Quit,
    Usage(&'static str),
    Unknown(String),
    Empty,
}

fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "login" if rest.is_empty() => ShellCommand::Login {
            identity: DEMO_IDENTITY.to_string(),
            secret: SecretString::from(DEMO_SECRET.to_string()),
        },
        "login" | "register" => {
            let mut parts = rest.split_whitespace();
            let (Some(identity), Some(secret), None) = (parts.next(), parts.next(), parts.next())
            else {
                return ShellCommand::Usage("usage: login|register <email> <password>");
            };
            let identity = identity.to_string();
            let secret = SecretString::from(secret.to_string());
            if word.eq_ignore_ascii_case("login") {
                ShellCommand::Login { identity, secret }
            } else {
                ShellCommand::Register { identity, secret }
            }
        }
        "search" => ShellCommand::Search(rest.to_string()),
        "name" => ShellCommand::Name(rest.to_string()),
        "email" => ShellCommand::Email(rest.to_string()),
        "phone" => ShellCommand::Phone(rest.to_string()),
        "create" => ShellCommand::Create,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(word.to_string()),
    }
}

/// Run the interactive shell until `quit`, end of input, or Ctrl-C.
/// # Errors
/// Returns an error if the client cannot be built or stdin fails.
pub async fn execute(args: Args) -> Result<()> {
    info!(backend = %args.config.api_base_url, "starting shell");
    let mut app = App::new(&args.config)?;

    println!(
        "visitor-pass {} ({GIT_COMMIT_HASH})",
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", app.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                None
            }
        };
        let Some(line) = line else {
            break;
        };

        if !handle(&mut app, parse_line(&line)).await {
            break;
        }
    }

    app.shutdown();
    Ok(())
}

/// Applies one command; returns `false` when the shell should exit.
async fn handle(app: &mut App, command: ShellCommand) -> bool {
    let screen = app.screen();
    match command {
        ShellCommand::Empty => {}
        ShellCommand::Quit => return false,
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Show => println!("{}", app.render()),
        ShellCommand::Usage(usage) => println!("{}", alert(AlertKind::Info, usage)),
        ShellCommand::Unknown(word) => println!(
            "{}",
            alert(AlertKind::Info, &format!("unknown command '{word}', try help"))
        ),
        ShellCommand::Login { .. } | ShellCommand::Register { .. }
            if screen.is_authenticated() =>
        {
            println!("{}", alert(AlertKind::Info, "Already signed in"));
        }
        ShellCommand::Login { identity, secret } => {
            // The error is kept on the sign-in surface.
            let _ = app.login(&identity, &secret).await;
            println!("{}", app.render());
        }
        ShellCommand::Register { identity, secret } => {
            let _ = app.register(&identity, &secret).await;
            println!("{}", app.render());
        }
        _ if !screen.is_authenticated() => {
            println!(
                "{}",
                alert(AlertKind::Info, "Sign in first: login [<email> <password>]")
            );
        }
        ShellCommand::Search(query) => {
            let _ = app.search(&query).await;
            println!("{}", app.render());
        }
        ShellCommand::Name(value) => edit_draft(app, |draft| draft.full_name = value),
        ShellCommand::Email(value) => edit_draft(app, |draft| draft.email = value),
        ShellCommand::Phone(value) => edit_draft(app, |draft| draft.phone = value),
        ShellCommand::Create => {
            if app.create().await.is_ok() {
                println!("{}", alert(AlertKind::Success, "Visitor created"));
            }
            println!("{}", app.render());
        }
    }
    true
}

fn edit_draft(app: &mut App, edit: impl FnOnce(&mut DraftVisitor)) {
    // The view mounts on the first sync after a credential appears.
    if let Some(repository) = app.visitors_mut() {
        edit(repository.draft_mut());
    }
    println!("{}", app.render());
}
