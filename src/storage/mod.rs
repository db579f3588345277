// storage/mod.rs
// Database operations module

mod insert;
mod pool;
mod queries;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use insert::load_to_db;
pub use pool::{init_db_pool_with_path, init_memory_pool};
pub use queries::{run_query, QueryResult, QueryValue};
