//! Persistence layer: connection pool setup and the document store backends.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryDocumentStore;
pub use pool::{create_pool, run_migrations, DatabaseError};
pub use postgres::PgDocumentStore;
pub use store::{Collection, DocumentQuery, DocumentStore, RawDocument};
