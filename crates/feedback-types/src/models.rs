use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored feedback record.
///
/// `id` and `created_at` are always assigned by the server at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
