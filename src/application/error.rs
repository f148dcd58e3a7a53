//! 应用层错误定义
//!
//! 管线各步骤的失败种类。所有错误一路上抛到调用边界，
//! 中途不捕获、不重试；已发布的产物保留在存储中。

use thiserror::Error;

use crate::application::ports::{OcrError, SynthesisError, UploadError};

/// 管线错误
#[derive(Debug, Error)]
pub enum PipelineError {
    /// OCR 服务报告任务终态失败
    #[error("OCR job {job_id} failed")]
    OcrJobFailed { job_id: String },

    /// 提交或轮询期间的传输/服务错误
    #[error("OCR request failed: {0}")]
    OcrTransport(#[from] OcrError),

    /// 轮询超出最大等待时间，任务未达终态
    #[error("OCR job {job_id} did not reach a terminal state within {waited_secs}s")]
    PollTimeout { job_id: String, waited_secs: u64 },

    /// 语音合成失败，后续块全部中止
    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// 存储写入失败，后续块全部中止
    #[error("Artifact upload failed: {0}")]
    Upload(#[from] UploadError),
}
