//! HTTP TTS Client - 调用外部语音合成 HTTP 服务
//!
//! 实现 SpeechSynthesizerPort trait，通过 HTTP 调用外部 TTS 服务
//!
//! 外部 TTS API:
//! POST {base}/api/tts/synthesize
//! Request: {"text": "...", "voiceId": "...", "outputFormat": "mp3", "engine": "neural"}  (JSON)
//! Response: 音频二进制流

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    AudioSegment, SpeechSynthesizerPort, SynthesisError, SynthesisRequest,
};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesizeHttpRequest<'a> {
    text: &'a str,
    #[serde(rename = "voiceId")]
    voice_id: &'a str,
    #[serde(rename = "outputFormat")]
    output_format: &'a str,
    engine: &'a str,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9200".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpTtsClientConfig {
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

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/api/tts/synthesize", self.config.base_url)
    }
}

#[async_trait]
impl SpeechSynthesizerPort for HttpTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioSegment, SynthesisError> {
        let text_chars = request.text.chars().count();
        tracing::debug!(
            url = %self.synthesize_url(),
            text_chars,
            voice_id = %request.voice_id,
            format = request.output_format.as_str(),
            engine = request.engine.as_str(),
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(&self.synthesize_url())
            .json(&SynthesizeHttpRequest {
                text: &request.text,
                voice_id: &request.voice_id,
                output_format: request.output_format.as_str(),
                engine: request.engine.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Err(SynthesisError::TextTooLong(text_chars));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 音频直接以流转交上传方，不在内存中聚合
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));

        tracing::debug!(voice_id = %request.voice_id, "Synthesis stream opened");

        Ok(AudioSegment {
            stream: Box::pin(stream),
            content_type: request.output_format.content_type(),
        })
    }
}
