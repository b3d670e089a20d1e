//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the vendor portal using SQLx.
//!
//! # Document Model
//!
//! Claims and service requests are stored as JSONB documents. The columns
//! used for filtering and ordering (draft flag, status, save time, kind) are
//! copied out of the document on every write, and a `seq` column records
//! insertion order for tie-breaks.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresClaimStore;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/vendor_portal")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresClaimStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use schema::run_migrations;
