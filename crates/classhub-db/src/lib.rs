//! # Classhub DB
//!
//! Storage for the Classhub API.
//!
//! Handlers never talk to the database directly; they go through the
//! [`Store`] trait, which is implemented by:
//!
//! - [`PgStore`]: PostgreSQL via SQLx, used in production
//! - [`MemoryStore`]: process-local tables behind one lock, used by tests
//!   and local experiments
//!
//! The purchase flow ([`PaymentStore::purchase`]) is a single unit of work
//! in both implementations.
//!
//! # Example
//!
//! ```ignore
//! use classhub_db::{MIGRATOR, PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! MIGRATOR.run(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{CartStore, ClassStore, EnrollmentStore, PaymentStore, Store, UserStore};

pub use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool.
///
/// `DATABASE_MAX_CONNECTIONS` caps the pool size (default 10). The pool is
/// cheap to clone and is meant to be created once at startup.
///
/// # Errors
///
/// Returns the SQLx error if the database cannot be reached.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
