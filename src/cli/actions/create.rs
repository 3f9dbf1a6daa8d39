use crate::{
    app::App,
    cli::actions::SignIn,
    client::AppConfig,
    features::visitors::{DraftVisitor, VisitorError},
    views::{alert, AlertKind},
};
use anyhow::{Context, Result};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub sign_in: SignIn,
    pub draft: DraftVisitor,
    pub query: String,
}

/// Sign in, submit the draft and print the refreshed visitors surface.
/// # Errors
/// Returns an error if sign-in or the create fails. A failed reload after a
/// stored create is shown on the surface but does not fail the command.
pub async fn execute(args: Args) -> Result<()> {
    debug!(backend = %args.config.api_base_url, "create action");
    let mut app = App::new(&args.config)?;
    args.sign_in.apply(&mut app).await?;

    let outcome = submit(&mut app, args.draft, &args.query).await;
    println!("{}", app.render());
    app.shutdown();

    outcome
}

/// Creates `draft` and reloads with `query`, confirming as soon as the backend
/// has stored the visitor.
async fn submit(app: &mut App, draft: DraftVisitor, query: &str) -> Result<()> {
    let repository = app
        .visitors_mut()
        .context("visitors view was not mounted after sign-in")?;
    repository.set_draft(draft);
    repository.set_query(query);

    match app.create().await {
        Ok(()) => {
            println!("{}", alert(AlertKind::Success, "Visitor created"));
            Ok(())
        }
        // Only the reload after a stored create reports `Search`.
        Err(VisitorError::Search(err)) => {
            println!("{}", alert(AlertKind::Success, "Visitor created"));
            warn!(error = %err, "visitor created but the list could not be reloaded");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::submit;
    use crate::{app::App, client::AppConfig, features::visitors::DraftVisitor};
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn draft() -> DraftVisitor {
        DraftVisitor {
            full_name: "Jane Doe".to_string(),
            ..DraftVisitor::default()
        }
    }

    async fn signed_in(server: &MockServer) -> App {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-1" })),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .up_to_n_times(1)
            .mount(server)
            .await;

        let mut app = App::new(&AppConfig::with_base_url(&server.uri())).unwrap();
        app.login("admin@example.com", &SecretString::from("pw".to_string()))
            .await
            .unwrap();
        app
    }

    #[tokio::test]
    async fn stored_visitor_with_failed_reload_still_succeeds() {
        let server = MockServer::start().await;
        let mut app = signed_in(&server).await;
        Mock::given(method("POST"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        submit(&mut app, draft(), "").await.unwrap();

        assert!(app.visitors().unwrap().draft().is_empty());
        assert!(app
            .visitor_error()
            .is_some_and(|message| message.starts_with("Search failed")));
        assert!(app.render().contains("[error] Search failed"));
    }

    #[tokio::test]
    async fn rejected_create_fails_the_command() {
        let server = MockServer::start().await;
        let mut app = signed_in(&server).await;
        Mock::given(method("POST"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let err = submit(&mut app, draft(), "").await.unwrap_err();

        assert!(err.to_string().starts_with("Create failed"));
        assert_eq!(app.visitors().unwrap().draft().full_name, "Jane Doe");
    }
}
