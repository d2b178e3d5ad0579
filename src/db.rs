pub mod inventory_repo;
pub use inventory_repo::InventoryStore;
pub mod pg_repo;
pub use pg_repo::PgInventoryRepository;
pub mod sqlite_repo;
pub use sqlite_repo::SqliteInventoryRepository;
