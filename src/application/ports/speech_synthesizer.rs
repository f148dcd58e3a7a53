//! Speech Synthesizer Port - 语音合成服务抽象
//!
//! 定义单块文本到音频字节流的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::object_storage::ByteStream;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Input text too long ({0} chars)")]
    TextTooLong(usize),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 音频输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    #[default]
    Mp3,
    OggVorbis,
    Pcm,
}

impl AudioFormat {
    /// 服务端识别的格式名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg_vorbis",
            Self::Pcm => "pcm",
        }
    }

    /// 产物文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg",
            Self::Pcm => "pcm",
        }
    }

    /// 上传时使用的 Content-Type
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::OggVorbis => "audio/ogg",
            Self::Pcm => "audio/pcm",
        }
    }
}

/// 合成引擎档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisEngine {
    Standard,
    #[default]
    Neural,
}

impl SynthesisEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Neural => "neural",
        }
    }
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本块
    pub text: String,
    /// 音色 ID
    pub voice_id: String,
    /// 输出格式
    pub output_format: AudioFormat,
    /// 引擎档位
    pub engine: SynthesisEngine,
}

/// 合成结果：音频字节流
///
/// 所有权随即移交给上传方，流只被消费一次
pub struct AudioSegment {
    pub stream: ByteStream,
    pub content_type: &'static str,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成一个文本块，返回音频字节流
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioSegment, SynthesisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_format_strings() {
        assert_eq!(AudioFormat::Mp3.as_str(), "mp3");
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
        assert_eq!(AudioFormat::Mp3.content_type(), "audio/mpeg");
        assert_eq!(AudioFormat::OggVorbis.as_str(), "ogg_vorbis");
        assert_eq!(AudioFormat::OggVorbis.extension(), "ogg");
    }

    #[test]
    fn test_defaults_match_deployment() {
        assert_eq!(AudioFormat::default(), AudioFormat::Mp3);
        assert_eq!(SynthesisEngine::default(), SynthesisEngine::Neural);
    }
}
