pub mod pool;
pub mod store;

// Re-export commonly used items
pub use pool::{create_pool, run_migrations};
pub use store::memory::MemoryCredentialStore;
pub use store::postgres::PgCredentialStore;
pub use store::{CredentialStore, StoreError, UserRow};
