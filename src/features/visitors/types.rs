use serde::Deserialize;
use std::fmt;
use tracing::warn;

/// Backend-owned visitor record; the client only ever reads it.
///
/// The backend keys records by `_id`; some responses also carry `id`, and either
/// may be a string or a number. `_id` wins when both are present.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireRecord")]
pub struct VisitorRecord {
    pub id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for WireId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Text(text) => formatter.write_str(text),
            WireId::Number(number) => write!(formatter, "{number}"),
        }
    }
}

#[derive(Deserialize)]
struct WireRecord {
    #[serde(rename = "_id", default)]
    backend_id: Option<WireId>,
    #[serde(default)]
    id: Option<WireId>,
    full_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

impl TryFrom<WireRecord> for VisitorRecord {
    type Error = String;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        let id = wire
            .backend_id
            .or(wire.id)
            .ok_or_else(|| "record has neither `_id` nor `id`".to_string())?;

        Ok(Self {
            id: id.to_string(),
            full_name: wire.full_name,
            email: wire.email,
            phone: wire.phone,
        })
    }
}

/// Visitor under construction on the client. Has no id until the backend assigns one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftVisitor {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl DraftVisitor {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }
}

/// Envelope of `GET /visitors`. A missing `items` field reads as no results.
/// Records are decoded one by one so a single odd entry does not hide the rest.
#[derive(Deserialize)]
pub(crate) struct VisitorListResponse {
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

impl VisitorListResponse {
    pub(crate) fn into_records(self) -> Vec<VisitorRecord> {
        self.items
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(index, error = %err, "skipping unreadable visitor record");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftVisitor, VisitorListResponse, VisitorRecord};
    use serde_json::json;

    #[test]
    fn record_accepts_backend_id_field() {
        let record: VisitorRecord = serde_json::from_value(json!({
            "_id": "65f0",
            "full_name": "Jane Doe",
            "email": "jane@x.com",
            "phone": null
        }))
        .unwrap();

        assert_eq!(record.id, "65f0");
        assert_eq!(record.email.as_deref(), Some("jane@x.com"));
        assert_eq!(record.phone, None);
    }

    #[test]
    fn record_accepts_plain_id_alias() {
        let record: VisitorRecord =
            serde_json::from_value(json!({ "id": "7", "full_name": "Sam" })).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.email, None);
    }

    #[test]
    fn record_with_both_ids_prefers_backend_id() {
        let record: VisitorRecord = serde_json::from_value(json!({
            "_id": "a1",
            "id": "legacy",
            "full_name": "Jane"
        }))
        .unwrap();
        assert_eq!(record.id, "a1");
    }

    #[test]
    fn record_accepts_numeric_id() {
        let record: VisitorRecord =
            serde_json::from_value(json!({ "id": 7, "full_name": "Sam" })).unwrap();
        assert_eq!(record.id, "7");
    }

    #[test]
    fn record_without_any_id_is_rejected() {
        let result = serde_json::from_value::<VisitorRecord>(json!({ "full_name": "Sam" }));
        assert!(result.is_err());
    }

    #[test]
    fn list_response_without_items_is_empty() {
        let response: VisitorListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_records().is_empty());

        let response: VisitorListResponse =
            serde_json::from_value(json!({ "items": null })).unwrap();
        assert!(response.into_records().is_empty());
    }

    #[test]
    fn unreadable_record_is_skipped_not_the_whole_list() {
        let response: VisitorListResponse = serde_json::from_value(json!({
            "items": [
                { "_id": "1", "full_name": "Jane", "phone": 5_550_100 },
                { "_id": "2", "id": "2", "full_name": "John" },
                { "id": 3, "full_name": "Ana", "email": "ana@x.com" }
            ]
        }))
        .unwrap();

        let records = response.into_records();
        let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn default_draft_is_empty() {
        let mut draft = DraftVisitor::default();
        assert!(draft.is_empty());
        draft.phone.push('1');
        assert!(!draft.is_empty());
    }
}
