//! OCR Poller - 提交任务并轮询至终态
//!
//! 提交文字检测任务后以固定间隔查询状态，间隔期挂起（非忙等）。
//! 轮询有最大等待预算：超出即以 PollTimeout 失败，不会无限阻塞。

use std::sync::Arc;
use std::time::Duration;

use crate::application::error::PipelineError;
use crate::application::ports::{BlockType, OcrEnginePort, OcrJobStatus, TextBlock};
use crate::domain::DocumentRef;

/// 轮询配置
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// 两次状态查询之间的间隔
    pub interval: Duration,
    /// 最大等待时间，超出即超时失败
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_wait: Duration::from_secs(300),
        }
    }
}

/// 轮询成功的结果
#[derive(Debug)]
pub struct OcrOutcome {
    /// OCR 服务分配的任务 ID
    pub job_id: String,
    /// 任务成功时返回的全部识别块
    pub blocks: Vec<TextBlock>,
}

/// OCR 轮询器
pub struct OcrPoller {
    engine: Arc<dyn OcrEnginePort>,
    config: PollConfig,
}

impl OcrPoller {
    pub fn new(engine: Arc<dyn OcrEnginePort>, config: PollConfig) -> Self {
        Self { engine, config }
    }

    /// 提交检测任务并轮询直至终态
    ///
    /// - Succeeded: 返回 job id 与识别块
    /// - Failed: 立即返回 OcrJobFailed，不再轮询
    /// - 等待超出 max_wait: 返回 PollTimeout
    pub async fn run(&self, document: &DocumentRef) -> Result<OcrOutcome, PipelineError> {
        let job_id = self.engine.start_text_detection(document).await?;

        tracing::info!(
            job_id = %job_id,
            document = %document,
            "OCR job submitted"
        );

        let mut waited = Duration::ZERO;
        loop {
            let report = self.engine.get_job_report(&job_id).await?;

            match report.status {
                OcrJobStatus::Succeeded => {
                    tracing::info!(
                        job_id = %job_id,
                        blocks = report.blocks.len(),
                        waited_secs = waited.as_secs(),
                        "OCR job succeeded"
                    );
                    return Ok(OcrOutcome {
                        job_id,
                        blocks: report.blocks,
                    });
                }
                OcrJobStatus::Failed => {
                    tracing::error!(job_id = %job_id, "OCR job failed");
                    return Err(PipelineError::OcrJobFailed { job_id });
                }
                OcrJobStatus::Running => {
                    if waited >= self.config.max_wait {
                        tracing::error!(
                            job_id = %job_id,
                            waited_secs = waited.as_secs(),
                            "OCR poll budget exhausted"
                        );
                        return Err(PipelineError::PollTimeout {
                            job_id,
                            waited_secs: waited.as_secs(),
                        });
                    }

                    tracing::debug!(job_id = %job_id, "OCR job still running");
                    tokio::time::sleep(self.config.interval).await;
                    waited += self.config.interval;
                }
            }
        }
    }
}

/// 从识别块集提取全文
///
/// 仅保留行级块，按服务返回顺序以单个空格拼接
pub fn extract_text(blocks: &[TextBlock]) -> String {
    let lines: Vec<&str> = blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Line)
        .map(|b| b.text.as_str())
        .collect();

    lines.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::OcrJobStatus::{Failed, Running, Succeeded};
    use crate::infrastructure::adapters::FakeOcrClient;

    fn fast_config() -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(1),
            max_wait: Duration::from_secs(60),
        }
    }

    fn document() -> DocumentRef {
        DocumentRef::new("documents", "inbox/report.pdf")
    }

    #[tokio::test]
    async fn test_polls_until_succeeded() {
        let engine = Arc::new(
            FakeOcrClient::new("job-1", vec![Running, Running, Succeeded])
                .with_blocks(vec![TextBlock::line("Hello world.")]),
        );
        let poller = OcrPoller::new(engine.clone(), fast_config());

        let outcome = poller.run(&document()).await.unwrap();

        // [Running, Running, Succeeded] 恰好三次状态查询
        assert_eq!(engine.query_count(), 3);
        assert_eq!(outcome.job_id, "job-1");
        assert_eq!(outcome.blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_status_stops_polling() {
        let engine = Arc::new(FakeOcrClient::new(
            "job-2",
            vec![Running, Failed, Succeeded],
        ));
        let poller = OcrPoller::new(engine.clone(), fast_config());

        let err = poller.run(&document()).await.unwrap_err();

        match err {
            PipelineError::OcrJobFailed { job_id } => assert_eq!(job_id, "job-2"),
            other => panic!("unexpected error: {:?}", other),
        }
        // Failed 之后不再查询
        assert_eq!(engine.query_count(), 2);
    }

    #[tokio::test]
    async fn test_poll_budget_exhaustion_times_out() {
        let engine = Arc::new(FakeOcrClient::new(
            "job-3",
            vec![Running, Running, Running, Running],
        ));
        let config = PollConfig {
            interval: Duration::from_millis(1),
            max_wait: Duration::from_millis(2),
        };
        let poller = OcrPoller::new(engine, config);

        let err = poller.run(&document()).await.unwrap_err();

        match err {
            PipelineError::PollTimeout { job_id, .. } => assert_eq!(job_id, "job-3"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extract_text_filters_line_blocks() {
        let blocks = vec![
            TextBlock {
                block_type: BlockType::Page,
                text: String::new(),
            },
            TextBlock::line("Hello world."),
            TextBlock {
                block_type: BlockType::Word,
                text: "Hello".to_string(),
            },
            TextBlock::line("This is page one."),
        ];

        assert_eq!(extract_text(&blocks), "Hello world. This is page one.");
    }

    #[test]
    fn test_extract_text_empty_blocks() {
        assert_eq!(extract_text(&[]), "");
    }
}
