pub mod create;
pub mod search;
pub mod shell;

// Internal "interpreter" for `Action`.
mod run;

use crate::app::App;
use anyhow::Result;
use secrecy::SecretString;

/// Operator credentials supplied on the command line.
#[derive(Debug)]
pub struct SignIn {
    pub identity: String,
    pub secret: SecretString,
    pub register: bool,
}

impl SignIn {
    /// Signs `app` in, registering first when requested.
    ///
    /// # Errors
    /// Returns the sign-in failure with its backend cause attached.
    pub async fn apply(&self, app: &mut App) -> Result<()> {
        if self.register {
            app.register(&self.identity, &self.secret).await?;
        } else {
            app.login(&self.identity, &self.secret).await?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum Action {
    Search(search::Args),
    Create(create::Args),
    Shell(shell::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}
