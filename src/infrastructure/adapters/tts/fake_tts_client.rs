//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定的音频字节，不实际调用 TTS 服务。
//! 可配置在第 N 次调用时注入失败，用于验证管线中止语义。

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;

use crate::application::ports::{
    AudioSegment, SpeechSynthesizerPort, SynthesisError, SynthesisRequest,
};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频字节
    pub audio_data: Vec<u8>,
    /// 在第 N 次调用（1 起始）返回失败；None 表示永不失败
    pub fail_on_call: Option<usize>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"fake-audio".to_vec(),
            fail_on_call: None,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: AtomicUsize,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
        }
    }

    /// 固定音频、永不失败的便捷构造
    pub fn with_audio(audio_data: Vec<u8>) -> Self {
        Self::new(FakeTtsClientConfig {
            audio_data,
            fail_on_call: None,
        })
    }

    /// 已发生的合成调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioSegment, SynthesisError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!(
            call,
            text_chars = request.text.chars().count(),
            voice_id = %request.voice_id,
            "FakeTtsClient: returning fixed audio"
        );

        if self.config.fail_on_call == Some(call) {
            return Err(SynthesisError::ServiceError(format!(
                "injected failure on call {}",
                call
            )));
        }

        let bytes = Bytes::from(self.config.audio_data.clone());
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![Ok(bytes)];
        let stream = stream::iter(chunks);

        Ok(AudioSegment {
            stream: Box::pin(stream),
            content_type: request.output_format.content_type(),
        })
    }
}
