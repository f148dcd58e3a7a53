//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod object_storage;
mod ocr_engine;
mod speech_synthesizer;

pub use object_storage::{ByteStream, ObjectStoragePort, UploadError, UploadTarget};
pub use ocr_engine::{
    BlockType, OcrEnginePort, OcrError, OcrJobReport, OcrJobStatus, TextBlock,
};
pub use speech_synthesizer::{
    AudioFormat, AudioSegment, SpeechSynthesizerPort, SynthesisEngine, SynthesisError,
    SynthesisRequest,
};
