//! HTTP Object Storage - 调用外部对象存储 HTTP 服务
//!
//! 实现 ObjectStoragePort trait，以分块传输的 PUT 请求流式上传
//!
//! 外部存储 API:
//! PUT {base}/{container}/{key}
//! Request body: 对象字节（流式），Content-Type 为对象内容类型
//! Response: 2xx 即确认写入完成

use async_trait::async_trait;
use reqwest::{Body, Client};
use std::time::Duration;

use crate::application::ports::{ByteStream, ObjectStoragePort, UploadError, UploadTarget};

/// HTTP 对象存储客户端配置
#[derive(Debug, Clone)]
pub struct HttpObjectStorageConfig {
    /// 存储服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpObjectStorageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9300".to_string(),
            timeout_secs: 60,
        }
    }
}

impl HttpObjectStorageConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 对象存储客户端
pub struct HttpObjectStorage {
    client: Client,
    config: HttpObjectStorageConfig,
}

impl HttpObjectStorage {
    /// 创建新的对象存储客户端
    pub fn new(config: HttpObjectStorageConfig) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UploadError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn object_url(&self, target: &UploadTarget) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url, target.container, target.key
        )
    }

    async fn put_body(&self, target: &UploadTarget, body: Body) -> Result<(), UploadError> {
        let url = self.object_url(target);

        tracing::debug!(
            url = %url,
            content_type = %target.content_type,
            "Uploading object"
        );

        let response = self
            .client
            .put(&url)
            .header(http::header::CONTENT_TYPE, target.content_type.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UploadError::Timeout
                } else if e.is_connect() {
                    UploadError::NetworkError(format!("Cannot connect to storage service: {}", e))
                } else {
                    UploadError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UploadError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        tracing::info!(
            container = %target.container,
            key = %target.key,
            "Object upload acknowledged"
        );
        Ok(())
    }
}

#[async_trait]
impl ObjectStoragePort for HttpObjectStorage {
    async fn put_stream(
        &self,
        target: &UploadTarget,
        body: ByteStream,
    ) -> Result<(), UploadError> {
        // 分块传输编码，整段音频不落内存
        self.put_body(target, Body::wrap_stream(body)).await
    }

    async fn put_bytes(&self, target: &UploadTarget, data: Vec<u8>) -> Result<(), UploadError> {
        self.put_body(target, Body::from(data)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpObjectStorageConfig::default();
        assert_eq!(config.base_url, "http://localhost:9300");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpObjectStorageConfig::new("http://storage:9300").with_timeout(30);
        assert_eq!(config.base_url, "http://storage:9300");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_object_url_layout() {
        let storage = HttpObjectStorage::new(HttpObjectStorageConfig::default()).unwrap();
        let target = UploadTarget::new("audiobooks", "audio/report_part1.mp3", "audio/mpeg");
        assert_eq!(
            storage.object_url(&target),
            "http://localhost:9300/audiobooks/audio/report_part1.mp3"
        );
    }
}
