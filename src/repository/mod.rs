//! Database repository layer

pub mod group_repo;
pub mod memory;
pub mod role_repo;
pub mod shop_repo;
pub mod store;

pub use group_repo::*;
pub use memory::MemoryStore;
pub use role_repo::*;
pub use shop_repo::*;
pub use store::*;
