//! Fake OCR Client - 用于测试的 OCR 客户端
//!
//! 按预设脚本依次返回任务状态，不实际调用 OCR 服务

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    OcrEnginePort, OcrError, OcrJobReport, OcrJobStatus, TextBlock,
};
use crate::domain::DocumentRef;

/// Fake OCR Client
///
/// 每次状态查询按脚本顺序弹出一个状态；Succeeded 时携带配置的识别块。
/// 记录查询次数供测试断言。
pub struct FakeOcrClient {
    job_id: String,
    statuses: Mutex<Vec<OcrJobStatus>>,
    blocks: Vec<TextBlock>,
    queries: AtomicUsize,
}

impl FakeOcrClient {
    pub fn new(job_id: impl Into<String>, statuses: Vec<OcrJobStatus>) -> Self {
        Self {
            job_id: job_id.into(),
            statuses: Mutex::new(statuses),
            blocks: Vec::new(),
            queries: AtomicUsize::new(0),
        }
    }

    /// 设置 Succeeded 时返回的识别块
    pub fn with_blocks(mut self, blocks: Vec<TextBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    /// 已发生的状态查询次数
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEnginePort for FakeOcrClient {
    async fn start_text_detection(&self, document: &DocumentRef) -> Result<String, OcrError> {
        tracing::debug!(
            document = %document,
            job_id = %self.job_id,
            "FakeOcrClient: job submitted"
        );
        Ok(self.job_id.clone())
    }

    async fn get_job_report(&self, job_id: &str) -> Result<OcrJobReport, OcrError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if job_id != self.job_id {
            return Err(OcrError::ServiceError(format!("Unknown job: {}", job_id)));
        }

        let status = {
            let mut statuses = self
                .statuses
                .lock()
                .map_err(|_| OcrError::ServiceError("status script poisoned".to_string()))?;
            if statuses.is_empty() {
                return Err(OcrError::ServiceError(
                    "status script exhausted".to_string(),
                ));
            }
            statuses.remove(0)
        };

        let blocks = if status == OcrJobStatus::Succeeded {
            self.blocks.clone()
        } else {
            Vec::new()
        };

        Ok(OcrJobReport { status, blocks })
    }
}
