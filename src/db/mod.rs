pub mod pool;
pub mod queries;
pub mod store;

pub use pool::create_pool;
pub use store::{PantryStore, PgStore};
