use bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::{info, warn};

use crate::models::{FEEDBACK_COLLECTION, FeedbackDocument, write_timestamp};

const SAMPLES: &[(&str, &str)] = &[
    (
        "Sample User",
        "This is a sample feedback message to get you started!",
    ),
    (
        "Another User",
        "Great application! Looking forward to more features.",
    ),
];

/// Prepare the `feedbacks` collection. Each step is best effort: a failure is
/// logged and the store stays usable.
pub async fn run(database: &Database, seed_samples: bool) {
    let collection = database.collection::<FeedbackDocument>(FEEDBACK_COLLECTION);

    // Newest-first listing walks this index.
    match collection
        .create_index(
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            None,
        )
        .await
    {
        Ok(_) => info!("Collection index on createdAt ready"),
        Err(e) => warn!("Could not create createdAt index: {}", e),
    }

    if seed_samples {
        match seed(&collection).await {
            Ok(0) => {}
            Ok(inserted) => info!("Seeded {} sample feedback records", inserted),
            Err(e) => warn!("Could not seed sample feedback: {}", e),
        }
    }
}

/// Upsert keyed on the sample name, so repeated or concurrent connects never
/// duplicate a sample.
async fn seed(collection: &Collection<FeedbackDocument>) -> Result<u64, mongodb::error::Error> {
    let created_at = bson::DateTime::from_chrono(write_timestamp());
    let mut inserted = 0;

    for (name, message) in SAMPLES {
        let result = collection
            .update_one(
                doc! { "name": *name },
                doc! {
                    "$setOnInsert": {
                        "name": *name,
                        "message": *message,
                        "createdAt": created_at,
                    }
                },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;

        if result.upserted_id.is_some() {
            inserted += 1;
        }
    }

    Ok(inserted)
}
