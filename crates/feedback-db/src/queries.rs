use bson::doc;
use feedback_types::models::Feedback;
use feedback_types::validation::NewFeedback;
use futures_util::TryStreamExt;
use mongodb::options::FindOptions;

use crate::error::DbError;
use crate::models::{FeedbackDocument, write_timestamp};
use crate::store::MongoStore;

impl MongoStore {
    /// Newest first. `_id` breaks ties between records written in the same millisecond.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<Feedback>, DbError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .limit(i64::from(limit))
            .build();

        let docs: Vec<FeedbackDocument> = self
            .collection()
            .find(None, options)
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(Feedback::from).collect())
    }

    pub async fn insert(&self, new: &NewFeedback) -> Result<Feedback, DbError> {
        let doc = FeedbackDocument::new(new.name(), new.message(), write_timestamp());
        self.collection().insert_one(&doc, None).await?;
        Ok(doc.into())
    }
}
