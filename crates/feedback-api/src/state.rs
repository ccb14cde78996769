use std::sync::Arc;

use feedback_db::Database;

/// Most records a single list call returns.
pub const PAGE_SIZE: u32 = 50;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub page_size: u32,
}

impl AppStateInner {
    pub fn new(db: Database) -> AppState {
        Arc::new(Self {
            db,
            page_size: PAGE_SIZE,
        })
    }
}
