use crate::{app::App, cli::actions::SignIn, client::AppConfig};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub sign_in: SignIn,
    pub query: String,
}

/// Sign in, list visitors and print the visitors surface.
/// # Errors
/// Returns an error if sign-in or the listing fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!(backend = %args.config.api_base_url, query = %args.query, "search action");
    let mut app = App::new(&args.config)?;
    args.sign_in.apply(&mut app).await?;

    // Signing in already ran the unfiltered listing.
    let outcome = if args.query.is_empty() {
        app.visitor_error().map_or(Ok(()), |message| Err(anyhow::anyhow!("{message}")))
    } else {
        app.search(&args.query).await.map_err(anyhow::Error::from)
    };

    println!("{}", app.render());
    app.shutdown();

    outcome
}
