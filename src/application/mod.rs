//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（OcrEngine、SpeechSynthesizer、ObjectStorage）
//! - ocr_poller: OCR 任务提交与轮询
//! - pipeline: 文档转语音管线编排
//! - error: 管线错误定义

pub mod error;
pub mod ocr_poller;
pub mod pipeline;
pub mod ports;

pub use error::PipelineError;
pub use ocr_poller::{extract_text, OcrOutcome, OcrPoller, PollConfig};
pub use pipeline::{DocumentPipeline, PipelineConfig, PipelineSummary};
