//! Storage Adapters - 对象存储客户端实现

mod http_object_storage;

pub use http_object_storage::{HttpObjectStorage, HttpObjectStorageConfig};
