//! Application State
//!
//! 管线与默认文档位置的应用状态

use std::sync::Arc;

use crate::application::{DocumentPipeline, PipelineConfig, PollConfig};
use crate::application::ports::{ObjectStoragePort, OcrEnginePort, SpeechSynthesizerPort};
use crate::domain::DocumentRef;

/// 应用状态
pub struct AppState {
    /// 文档转语音管线
    pub pipeline: DocumentPipeline,
    /// 未在请求中覆盖时使用的源文档位置
    pub default_source: DocumentRef,
}

impl AppState {
    pub fn new(
        pipeline_config: PipelineConfig,
        poll_config: PollConfig,
        default_source: DocumentRef,
        ocr_engine: Arc<dyn OcrEnginePort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        storage: Arc<dyn ObjectStoragePort>,
    ) -> Self {
        Self {
            pipeline: DocumentPipeline::new(
                pipeline_config,
                ocr_engine,
                poll_config,
                synthesizer,
                storage,
            ),
            default_source,
        }
    }
}
