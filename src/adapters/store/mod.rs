//! Persistence for doctors and slots
//!
//! - [`SlotStore`] - the storage trait the synchronizer depends on
//! - [`MemoryStore`] - in-process backend
//! - [`create_store`] - picks a backend from configuration

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_store;
pub use memory::MemoryStore;
pub use traits::SlotStore;
