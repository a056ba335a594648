//! Application state.

use stride_ai::AiClient;
use stride_cache::Cache;
use stride_db::DbPool;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub cache: Cache,
    pub ai: AiClient,
}

impl AppState {
    pub fn new(db: DbPool, cache: Cache, ai: AiClient) -> Self {
        Self { db, cache, ai }
    }
}
