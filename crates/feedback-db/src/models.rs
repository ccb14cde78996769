//! Document types, mapped directly to the `feedbacks` collection.
//! Distinct from feedback-types API models to keep the storage shape independent.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use feedback_types::models::Feedback;
use serde::{Deserialize, Serialize};

pub const FEEDBACK_COLLECTION: &str = "feedbacks";

/// Server-side write time.
///
/// BSON datetimes carry millisecond precision, so the value is rounded up to
/// the next millisecond: it never precedes the write and survives a round trip.
pub fn write_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    let sub_millis = now.timestamp_subsec_nanos() % 1_000_000;
    if sub_millis == 0 {
        now
    } else {
        now + chrono::Duration::nanoseconds(i64::from(1_000_000 - sub_millis))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub message: String,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

impl FeedbackDocument {
    pub fn new(name: &str, message: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.to_string(),
            message: message.to_string(),
            created_at,
        }
    }
}

impl From<FeedbackDocument> for Feedback {
    fn from(doc: FeedbackDocument) -> Self {
        Feedback {
            id: doc.id.to_hex(),
            name: doc.name,
            message: doc.message,
            created_at: doc.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_created_at_as_bson_datetime() {
        let created_at: DateTime<Utc> = "2024-03-01T12:00:00Z".parse().unwrap();
        let doc = FeedbackDocument::new("Ada", "Nice", created_at);

        let raw = bson::to_document(&doc).unwrap();
        assert!(matches!(raw.get("createdAt"), Some(bson::Bson::DateTime(_))));
        assert!(matches!(raw.get("_id"), Some(bson::Bson::ObjectId(_))));
    }

    #[test]
    fn write_timestamp_is_whole_millis_and_not_early() {
        let before = Utc::now();
        let ts = write_timestamp();
        assert!(ts >= before);
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn converts_to_api_model() {
        let doc = FeedbackDocument::new("Ada", "Nice", Utc::now());
        let id = doc.id.to_hex();
        let feedback = Feedback::from(doc);
        assert_eq!(feedback.id, id);
        assert_eq!(feedback.id.len(), 24);
    }
}
