//! HTTP OCR Client - 调用外部 OCR HTTP 服务
//!
//! 实现 OcrEnginePort trait，通过 HTTP 调用外部文字识别服务
//!
//! 外部 OCR API:
//! POST {base}/api/ocr/detect        Request: {"container": "...", "key": "..."}
//!                                   Response: {"jobId": "..."}
//! GET  {base}/api/ocr/jobs/{jobId}  Response: {"jobStatus": "RUNNING|SUCCEEDED|FAILED",
//!                                              "blocks": [{"blockType": "LINE", "text": "..."}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    BlockType, OcrEnginePort, OcrError, OcrJobReport, OcrJobStatus, TextBlock,
};
use crate::domain::DocumentRef;

/// 检测任务提交请求体 (JSON)
#[derive(Debug, Serialize)]
struct StartDetectionRequest<'a> {
    container: &'a str,
    key: &'a str,
}

#[derive(Debug, Deserialize)]
struct StartDetectionResponse {
    #[serde(rename = "jobId")]
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct JobReportResponse {
    #[serde(rename = "jobStatus")]
    job_status: String,
    #[serde(default)]
    blocks: Vec<BlockDto>,
}

#[derive(Debug, Deserialize)]
struct BlockDto {
    #[serde(rename = "blockType")]
    block_type: String,
    #[serde(default)]
    text: String,
}

/// HTTP OCR 客户端配置
#[derive(Debug, Clone)]
pub struct HttpOcrClientConfig {
    /// OCR 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpOcrClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9100".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpOcrClientConfig {
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

/// HTTP OCR 客户端
pub struct HttpOcrClient {
    client: Client,
    config: HttpOcrClientConfig,
}

impl HttpOcrClient {
    /// 创建新的 HTTP OCR 客户端
    pub fn new(config: HttpOcrClientConfig) -> Result<Self, OcrError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OcrError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn detect_url(&self) -> String {
        format!("{}/api/ocr/detect", self.config.base_url)
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{}/api/ocr/jobs/{}", self.config.base_url, job_id)
    }
}

fn map_transport_error(e: reqwest::Error) -> OcrError {
    if e.is_timeout() {
        OcrError::Timeout
    } else if e.is_connect() {
        OcrError::NetworkError(format!("Cannot connect to OCR service: {}", e))
    } else {
        OcrError::NetworkError(e.to_string())
    }
}

/// 解析服务端任务状态字符串
fn parse_job_status(raw: &str) -> Result<OcrJobStatus, OcrError> {
    match raw {
        "RUNNING" | "IN_PROGRESS" => Ok(OcrJobStatus::Running),
        "SUCCEEDED" => Ok(OcrJobStatus::Succeeded),
        "FAILED" => Ok(OcrJobStatus::Failed),
        other => Err(OcrError::InvalidResponse(format!(
            "Unknown job status: {}",
            other
        ))),
    }
}

/// 解析块类型；未知类型返回 None（提取阶段只关心行级块）
fn parse_block_type(raw: &str) -> Option<BlockType> {
    match raw {
        "PAGE" => Some(BlockType::Page),
        "LINE" => Some(BlockType::Line),
        "WORD" => Some(BlockType::Word),
        _ => None,
    }
}

#[async_trait]
impl OcrEnginePort for HttpOcrClient {
    async fn start_text_detection(&self, document: &DocumentRef) -> Result<String, OcrError> {
        tracing::debug!(
            url = %self.detect_url(),
            document = %document,
            "Submitting OCR detection job"
        );

        let response = self
            .client
            .post(&self.detect_url())
            .json(&StartDetectionRequest {
                container: &document.container,
                key: &document.key,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OcrError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: StartDetectionResponse = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(e.to_string()))?;

        Ok(body.job_id)
    }

    async fn get_job_report(&self, job_id: &str) -> Result<OcrJobReport, OcrError> {
        let response = self
            .client
            .get(&self.job_url(job_id))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OcrError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: JobReportResponse = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(e.to_string()))?;

        let job_status = parse_job_status(&body.job_status)?;
        let blocks = body
            .blocks
            .into_iter()
            .filter_map(|b| {
                parse_block_type(&b.block_type).map(|block_type| TextBlock {
                    block_type,
                    text: b.text,
                })
            })
            .collect();

        Ok(OcrJobReport {
            status: job_status,
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpOcrClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:9100");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpOcrClientConfig::new("http://ocr:9100").with_timeout(10);
        assert_eq!(config.base_url, "http://ocr:9100");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_parse_job_status() {
        assert_eq!(parse_job_status("RUNNING").unwrap(), OcrJobStatus::Running);
        assert_eq!(
            parse_job_status("IN_PROGRESS").unwrap(),
            OcrJobStatus::Running
        );
        assert_eq!(
            parse_job_status("SUCCEEDED").unwrap(),
            OcrJobStatus::Succeeded
        );
        assert_eq!(parse_job_status("FAILED").unwrap(), OcrJobStatus::Failed);
        assert!(parse_job_status("PARTIAL").is_err());
    }

    #[test]
    fn test_parse_block_type_unknown_is_skipped() {
        assert_eq!(parse_block_type("LINE"), Some(BlockType::Line));
        assert_eq!(parse_block_type("CELL"), None);
    }
}
