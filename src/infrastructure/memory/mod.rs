//! Memory Layer - In-Memory Implementations
//!
//! ObjectStoragePort 的内存实现，测试与本地运行用

mod object_store;

pub use object_store::{InMemoryObjectStorage, StoredObject};
