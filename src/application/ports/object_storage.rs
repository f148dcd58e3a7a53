//! Object Storage Port - 对象存储抽象
//!
//! 定义流式上传的抽象接口，具体实现在 infrastructure 层。
//! 上传体为字节流，任意大小的音频段无需整体驻留内存。

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use thiserror::Error;

/// 上传/下载通用的字节流类型
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// 上传错误
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),
}

/// 上传目标：容器 + key + 内容类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub container: String,
    pub key: String,
    pub content_type: String,
}

impl UploadTarget {
    pub fn new(
        container: impl Into<String>,
        key: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
            content_type: content_type.into(),
        }
    }
}

/// Object Storage Port
#[async_trait]
pub trait ObjectStoragePort: Send + Sync {
    /// 流式上传，确认写入完成后返回
    ///
    /// 相同 target 重复上传为覆盖语义，不产生版本
    async fn put_stream(&self, target: &UploadTarget, body: ByteStream)
        -> Result<(), UploadError>;

    /// 上传小对象（清单等），内容已在内存中
    async fn put_bytes(&self, target: &UploadTarget, data: Vec<u8>) -> Result<(), UploadError>;
}
