use super::alert::{alert, AlertKind};
use crate::features::visitors::{VisitorRecord, VisitorRepository};

const MISSING: &str = "—";

/// Renders the visitors surface from the repository's current state.
#[must_use]
pub fn render_visitors(repository: &VisitorRepository, error: Option<&str>) -> String {
    let draft = repository.draft();
    let query = if repository.query().is_empty() {
        "(none)"
    } else {
        repository.query()
    };

    let mut lines = vec![
        "Visitors".to_string(),
        format!("Search: {query}"),
        format!(
            "New Visitor: {} · {} · {}",
            or_missing(Some(draft.full_name.as_str())),
            or_missing(Some(draft.email.as_str())),
            or_missing(Some(draft.phone.as_str())),
        ),
    ];

    if let Some(message) = error {
        lines.push(alert(AlertKind::Error, message));
    }

    lines.push(format!("All Visitors ({})", repository.items().len()));
    lines.extend(repository.items().iter().map(render_record));

    lines.join("\n")
}

fn render_record(record: &VisitorRecord) -> String {
    format!(
        "  {}  {} · {}",
        record.full_name,
        or_missing(record.email.as_deref()),
        or_missing(record.phone.as_deref()),
    )
}

fn or_missing(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => MISSING,
    }
}

#[cfg(test)]
mod tests {
    use super::{or_missing, render_record, render_visitors};
    use crate::{
        client::{ApiClient, AppConfig},
        features::{
            auth::SessionStore,
            visitors::{VisitorRecord, VisitorRepository},
        },
    };
    use tokio_util::sync::CancellationToken;

    #[test]
    fn missing_and_empty_values_render_as_dash() {
        assert_eq!(or_missing(None), "—");
        assert_eq!(or_missing(Some("")), "—");
        assert_eq!(or_missing(Some("555-0100")), "555-0100");
    }

    #[test]
    fn record_line_shows_name_and_contacts() {
        let record = VisitorRecord {
            id: "1".to_string(),
            full_name: "Jane Doe".to_string(),
            email: Some("jane@x.com".to_string()),
            phone: None,
        };
        assert_eq!(render_record(&record), "  Jane Doe  jane@x.com · —");
    }

    #[test]
    fn empty_repository_renders_headers_and_draft() {
        let api = ApiClient::new(&AppConfig::default()).unwrap();
        let mut repo = VisitorRepository::new(api, SessionStore::new(), CancellationToken::new());
        repo.draft_mut().full_name = "Jane".to_string();

        let text = render_visitors(&repo, Some("Search failed"));
        assert!(text.starts_with("Visitors\nSearch: (none)"));
        assert!(text.contains("New Visitor: Jane · — · —"));
        assert!(text.contains("[error] Search failed"));
        assert!(text.ends_with("All Visitors (0)"));
    }
}
