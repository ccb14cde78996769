pub mod error;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod secrets;
pub mod settings;
pub mod store;
pub mod strategy;

use std::sync::Arc;

use feedback_types::api::{DatabaseHealth, StoreStatus};
use feedback_types::models::Feedback;
use feedback_types::validation::NewFeedback;
use tokio::sync::RwLock;
use tracing::{error, info};

pub use error::DbError;
pub use memory::MemoryStore;
pub use settings::DbSettings;
pub use store::{MongoStore, Store};
pub use strategy::{ConnectionStrategy, MongoConfig};

/// Process-wide database handle.
///
/// The backing store is chosen from the settings once, but only connected on
/// first use. The connected store is memoized; a failed connect leaves the slot
/// empty so the next call tries again.
pub struct Database {
    settings: DbSettings,
    strategy: ConnectionStrategy,
    config: MongoConfig,
    slot: RwLock<Option<Arc<Store>>>,
}

impl Database {
    pub fn new(settings: DbSettings) -> Self {
        let strategy = ConnectionStrategy::resolve(&settings);
        let config = MongoConfig::describe(&settings, strategy);
        info!(
            "Storage strategy: {} (environment: {}, uri: {})",
            strategy, config.environment, config.uri
        );

        Self {
            settings,
            strategy,
            config,
            slot: RwLock::new(None),
        }
    }

    /// Handle with an already-connected store.
    pub fn with_store(settings: DbSettings, store: Store) -> Self {
        let db = Self::new(settings);
        Self {
            slot: RwLock::new(Some(Arc::new(store))),
            ..db
        }
    }

    pub fn strategy(&self) -> ConnectionStrategy {
        self.strategy
    }

    pub async fn store(&self) -> Result<Arc<Store>, DbError> {
        if let Some(store) = self.slot.read().await.as_ref() {
            return Ok(store.clone());
        }

        // Not held across the connect: a concurrent first call may connect
        // too, and whichever lands first is kept.
        let store = Arc::new(self.connect().await.inspect_err(|e| {
            error!("MongoDB connection failed: {}", e);
        })?);

        let mut slot = self.slot.write().await;
        Ok(slot.get_or_insert(store).clone())
    }

    async fn connect(&self) -> Result<Store, DbError> {
        if self.strategy == ConnectionStrategy::BuildTimeSafe {
            info!("Build-time detected, using in-memory store");
            return Ok(Store::Memory(MemoryStore::new()));
        }

        let Some(uri) = strategy::resolve_uri(&self.settings, self.strategy).await else {
            return Err(DbError::Connect(format!(
                "no connection URI for strategy {}",
                self.strategy
            )));
        };

        let store = MongoStore::connect(&uri, self.settings.seed_samples).await?;
        Ok(Store::Mongo(store))
    }

    pub async fn list_recent(&self, limit: u32) -> Result<Vec<Feedback>, DbError> {
        self.store().await?.list_recent(limit).await
    }

    pub async fn insert_feedback(&self, new: &NewFeedback) -> Result<Feedback, DbError> {
        self.store().await?.insert(new).await
    }

    /// Report store reachability. Build-time handles answer without connecting.
    pub async fn health(&self) -> DatabaseHealth {
        let mut health = DatabaseHealth {
            status: StoreStatus::BuildTimeSafe,
            environment: self.config.environment.clone(),
            database: self.config.database.clone(),
            user: self.config.username.clone(),
            cluster: self.config.cluster().to_string(),
            error: None,
        };

        if self.strategy == ConnectionStrategy::BuildTimeSafe {
            return health;
        }

        let reachable = match self.store().await {
            Ok(store) => {
                if let Some(name) = store.database_name() {
                    health.database = name.to_string();
                }
                store.ping().await
            }
            Err(e) => Err(e),
        };

        match reachable {
            Ok(()) => health.status = StoreStatus::Connected,
            Err(e) => {
                error!("Database health check failed: {}", e);
                health.status = StoreStatus::Disconnected;
                health.error = Some(e.to_string());
            }
        }

        health
    }

    /// Drop the memoized store and release its connections.
    pub async fn close(&self) {
        let store = self.slot.write().await.take();
        if let Some(store) = store {
            store.close().await;
            info!("Database connection closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_settings() -> DbSettings {
        DbSettings {
            environment: "production".into(),
            phase: Some("build".into()),
            ..DbSettings::default()
        }
    }

    fn new(name: &str, message: &str) -> NewFeedback {
        NewFeedback::parse(Some(name), Some(message)).unwrap()
    }

    #[tokio::test]
    async fn build_time_uses_memory_store() {
        let db = Database::new(build_settings());
        assert_eq!(db.strategy(), ConnectionStrategy::BuildTimeSafe);

        let created = db.insert_feedback(&new("Ada", "hello")).await.unwrap();
        let list = db.list_recent(50).await.unwrap();
        assert_eq!(list, vec![created]);
        assert!(matches!(*db.store().await.unwrap(), Store::Memory(_)));
    }

    #[tokio::test]
    async fn build_time_health_does_not_connect() {
        let db = Database::new(build_settings());
        let health = db.health().await;
        assert_eq!(health.status, StoreStatus::BuildTimeSafe);
        assert_eq!(health.environment, "build");
        assert_eq!(health.cluster, "build-time");
        assert!(db.slot.read().await.is_none());
    }

    #[tokio::test]
    async fn store_is_memoized() {
        let db = Database::new(build_settings());
        let first = db.store().await.unwrap();
        let second = db.store().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn health_reflects_outage() {
        let memory = MemoryStore::new();
        let db = Database::with_store(DbSettings::default(), Store::Memory(memory.clone()));

        let health = db.health().await;
        assert_eq!(health.status, StoreStatus::Connected);
        assert_eq!(health.cluster, "local");

        memory.set_reachable(false);
        let health = db.health().await;
        assert_eq!(health.status, StoreStatus::Disconnected);
        assert!(health.error.is_some());

        memory.set_reachable(true);
        assert_eq!(db.health().await.status, StoreStatus::Connected);
    }

    #[tokio::test]
    async fn close_forgets_store() {
        let db = Database::new(build_settings());
        db.insert_feedback(&new("Ada", "hello")).await.unwrap();
        db.close().await;
        assert!(db.slot.read().await.is_none());

        // Reconnecting yields a fresh in-memory store.
        assert!(db.list_recent(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connect_error() {
        let settings = DbSettings {
            mongodb_uri: Some(
                "mongodb://127.0.0.1:1/feedbackhub?serverSelectionTimeoutMS=200".into(),
            ),
            ..DbSettings::default()
        };
        let db = Database::new(settings);

        let err = db.list_recent(50).await.unwrap_err();
        assert!(matches!(err, DbError::Connect(_)));
        assert!(db.slot.read().await.is_none());

        let health = db.health().await;
        assert_eq!(health.status, StoreStatus::Disconnected);
    }
}
