//! Backend drivers
//!
//! Flat stores (etcd, Consul, memory) implement `KeyValueStore` and are
//! wrapped in `FlatBackend`; documents are served by `DocumentBackend`.

mod consul;
mod document;
mod etcd;
mod flat;
mod memory;

pub use consul::ConsulStore;
pub use document::{DocumentBackend, DocumentFormat};
pub use etcd::EtcdStore;
pub use flat::FlatBackend;
pub use memory::MemoryStore;
