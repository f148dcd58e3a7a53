//! OCR Engine Port - 文字识别服务抽象
//!
//! 定义异步文字检测任务的抽象接口，具体实现在 infrastructure/adapters 层。
//! 任务模型：提交文档位置换取 job id，随后轮询状态直至终态。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::DocumentRef;

/// OCR 错误
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// OCR 任务状态
///
/// Succeeded / Failed 为终态，Running 继续轮询
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrJobStatus {
    Running,
    Succeeded,
    Failed,
}

impl OcrJobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// 识别块类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Page,
    Line,
    Word,
}

/// 识别出的文本块
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub block_type: BlockType,
    pub text: String,
}

impl TextBlock {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            block_type: BlockType::Line,
            text: text.into(),
        }
    }
}

/// 一次状态查询的结果
///
/// blocks 仅在 Succeeded 时有内容
#[derive(Debug, Clone)]
pub struct OcrJobReport {
    pub status: OcrJobStatus,
    pub blocks: Vec<TextBlock>,
}

/// OCR Engine Port
#[async_trait]
pub trait OcrEnginePort: Send + Sync {
    /// 提交异步文字检测任务，返回服务端分配的 job id
    async fn start_text_detection(&self, document: &DocumentRef) -> Result<String, OcrError>;

    /// 查询任务状态；成功终态时携带全部识别块
    async fn get_job_report(&self, job_id: &str) -> Result<OcrJobReport, OcrError>;
}
