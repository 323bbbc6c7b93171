//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use taskhub::tracker::adapters::postgres::PostgresTracker;
use tokio::runtime::Runtime;

/// SQL to create the base schema for tests.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-08-01-000000_create_tracker_tables/up.sql");

/// Prepared store context for tests that need database access.
pub struct StoreContext {
    /// Shared cluster the test database lives on.
    pub cluster: PostgresCluster,
    /// Name of the per-test database.
    pub db_name: String,
    /// Store under test.
    pub store: PostgresTracker,
    /// Runtime for driving async repository calls.
    pub rt: Runtime,
}

impl StoreContext {
    /// Drops the per-test database.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be dropped.
    pub fn cleanup(self) {
        let Self {
            cluster,
            db_name,
            store,
            rt,
        } = self;
        drop(store);
        drop(rt);
        cluster
            .drop_database(&db_name)
            .expect("test database cleanup should succeed");
    }
}

/// Creates a per-test database with the schema applied and a store over it.
///
/// # Panics
///
/// Panics when database creation, migration, or pool setup fails.
#[must_use]
pub fn store_context(cluster: PostgresCluster) -> StoreContext {
    let db_name = format!("test_{}", uuid::Uuid::new_v4().simple());
    cluster
        .create_database(&db_name)
        .expect("test database creation should succeed");

    let url = cluster.database_url(&db_name);
    let mut conn =
        PgConnection::establish(&url).expect("connection to the test database should succeed");
    conn.batch_execute(CREATE_SCHEMA_SQL)
        .expect("schema migration should succeed");
    drop(conn);

    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(2)
        .build(manager)
        .expect("pool setup should succeed");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime should build");

    StoreContext {
        cluster,
        db_name,
        store: PostgresTracker::new(pool),
        rt,
    }
}
