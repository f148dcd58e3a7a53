//! Domain Layer - 领域层
//!
//! 纯领域逻辑，无 I/O：
//! - chunker: 文本分块（核心算法）
//! - document: 文档引用与产物命名

mod chunker;
mod document;

pub use chunker::{chunk_text, chunk_text_default, ChunkConfig, DEFAULT_MAX_CHUNK_CHARS};
pub use document::{artifact_key, manifest_key, DocumentRef};
