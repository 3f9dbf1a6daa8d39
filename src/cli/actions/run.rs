use crate::cli::actions::{create, search, shell, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Search(args) => search::execute(args).await,
        Action::Create(args) => create::execute(args).await,
        Action::Shell(args) => shell::execute(args).await,
    }
}
