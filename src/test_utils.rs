//! Shared helpers for unit tests.

use std::sync::Arc;

use crate::storage::{DataStore, connect};

/// Fresh in-memory sqlite store with all tables created.
pub(crate) async fn test_store() -> Arc<dyn DataStore> {
    let store = connect("sqlite::memory:")
        .await
        .expect("in-memory store should connect");
    crate::init_stores(store.as_ref())
        .await
        .expect("table creation should succeed");
    store
}
