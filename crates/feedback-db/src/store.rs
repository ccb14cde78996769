use std::time::Duration;

use bson::doc;
use feedback_types::models::Feedback;
use feedback_types::validation::NewFeedback;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::migrations;
use crate::models::{FEEDBACK_COLLECTION, FeedbackDocument};
use crate::strategy::{DEFAULT_DATABASE, redact_uri};

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const APP_NAME: &str = "feedbackhub";

/// A connected backing store.
pub enum Store {
    Memory(MemoryStore),
    Mongo(MongoStore),
}

impl Store {
    /// Name of the database actually selected, for networked stores.
    pub fn database_name(&self) -> Option<&str> {
        match self {
            Self::Memory(_) => None,
            Self::Mongo(store) => Some(store.database_name()),
        }
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        match self {
            Self::Memory(store) => store.ping().await,
            Self::Mongo(store) => store.ping().await,
        }
    }

    pub async fn list_recent(&self, limit: u32) -> Result<Vec<Feedback>, DbError> {
        match self {
            Self::Memory(store) => store.list_recent(limit).await,
            Self::Mongo(store) => store.list_recent(limit).await,
        }
    }

    pub async fn insert(&self, new: &NewFeedback) -> Result<Feedback, DbError> {
        match self {
            Self::Memory(store) => store.insert(new).await,
            Self::Mongo(store) => store.insert(new).await,
        }
    }

    pub async fn close(&self) {
        match self {
            Self::Memory(_) => {}
            Self::Mongo(store) => store.client.clone().shutdown().await,
        }
    }
}

pub struct MongoStore {
    client: Client,
    database: mongodb::Database,
}

impl MongoStore {
    /// Connect, verify the server answers, and prepare the collection.
    pub async fn connect(uri: &str, seed_samples: bool) -> Result<Self, DbError> {
        Self::connect_to(uri, None, seed_samples).await
    }

    /// Like [`MongoStore::connect`], with `database` overriding the URI's default database.
    pub async fn connect_to(
        uri: &str,
        database: Option<&str>,
        seed_samples: bool,
    ) -> Result<Self, DbError> {
        debug!("Connecting to {}", redact_uri(uri));

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| DbError::Connect(e.to_string()))?;
        options
            .server_selection_timeout
            .get_or_insert(SERVER_SELECTION_TIMEOUT);
        options.app_name.get_or_insert_with(|| APP_NAME.to_string());

        let client = Client::with_options(options).map_err(|e| DbError::Connect(e.to_string()))?;
        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        let store = Self { client, database };
        store
            .ping()
            .await
            .map_err(|e| DbError::Connect(e.to_string()))?;

        // Setup failures leave the store usable for reads and writes.
        migrations::run(&store.database, seed_samples).await;

        info!("Connected to MongoDB database '{}'", store.database.name());
        Ok(store)
    }

    pub fn database(&self) -> &mongodb::Database {
        &self.database
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    pub(crate) fn collection(&self) -> Collection<FeedbackDocument> {
        self.database.collection(FEEDBACK_COLLECTION)
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
