//! Integration test against a live MongoDB server.
//!
//! Ignored by default. Run with a reachable server:
//!
//!   MONGODB_URI=mongodb://localhost:27017 cargo test -p feedback-db -- --ignored
//!
//! Each run works in a throwaway database that is dropped at the end.

use bson::oid::ObjectId;
use feedback_db::{Database, DbSettings, MongoStore, Store};
use feedback_types::api::StoreStatus;
use feedback_types::validation::NewFeedback;

fn new(name: &str, message: &str) -> NewFeedback {
    NewFeedback::parse(Some(name), Some(message)).unwrap()
}

#[tokio::test]
#[ignore = "needs a MongoDB server in MONGODB_URI"]
async fn mongo_store_round_trip() {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let name = format!("feedbackhub_test_{}", ObjectId::new().to_hex());

    // First connect creates the index and seeds both samples.
    let store = MongoStore::connect_to(&uri, Some(&name), true).await.unwrap();
    assert_eq!(store.database_name(), name);
    assert_eq!(store.list_recent(50).await.unwrap().len(), 2);

    // Seeding again is a no-op.
    let store = MongoStore::connect_to(&uri, Some(&name), true).await.unwrap();
    assert_eq!(store.list_recent(50).await.unwrap().len(), 2);

    let mut last = None;
    for i in 0..7 {
        last = Some(store.insert(&new(&format!("user{}", i), "hi")).await.unwrap());
    }

    let list = store.list_recent(5).await.unwrap();
    assert_eq!(list.len(), 5);
    assert!(list.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(Some(&list[0]), last.as_ref());

    let db = Database::with_store(DbSettings::default(), Store::Mongo(store));
    let health = db.health().await;
    assert_eq!(health.status, StoreStatus::Connected);
    assert_eq!(health.database, name);

    if let Store::Mongo(store) = &*db.store().await.unwrap() {
        store.database().drop(None).await.unwrap();
    }
    db.close().await;
}
