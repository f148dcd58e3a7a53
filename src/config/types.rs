//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::ports::{AudioFormat, SynthesisEngine};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// OCR 服务配置
    #[serde(default)]
    pub ocr: OcrConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 对象存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 管线配置
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// OCR 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// OCR 服务基础 URL
    #[serde(default = "default_ocr_url")]
    pub url: String,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_ocr_timeout")]
    pub timeout_secs: u64,

    /// 轮询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// 最大轮询等待时间（秒），超出即超时失败
    #[serde(default = "default_max_poll")]
    pub max_poll_secs: u64,
}

fn default_ocr_url() -> String {
    "http://localhost:9100".to_string()
}

fn default_ocr_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    3
}

fn default_max_poll() -> u64 {
    300
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            url: default_ocr_url(),
            timeout_secs: default_ocr_timeout(),
            poll_interval_secs: default_poll_interval(),
            max_poll_secs: default_max_poll(),
        }
    }
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 合成音色
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// 输出格式
    #[serde(default)]
    pub output_format: AudioFormat,

    /// 引擎档位
    #[serde(default)]
    pub engine: SynthesisEngine,
}

fn default_tts_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

fn default_voice_id() -> String {
    "Arthur".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
            voice_id: default_voice_id(),
            output_format: AudioFormat::default(),
            engine: SynthesisEngine::default(),
        }
    }
}

/// 对象存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 存储服务基础 URL
    #[serde(default = "default_storage_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_storage_timeout")]
    pub timeout_secs: u64,
}

fn default_storage_url() -> String {
    "http://localhost:9300".to_string()
}

fn default_storage_timeout() -> u64 {
    60
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: default_storage_url(),
            timeout_secs: default_storage_timeout(),
        }
    }
}

/// 管线配置
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    /// 源文档容器
    #[serde(default = "default_source_container")]
    pub source_container: String,

    /// 源文档 key
    #[serde(default = "default_source_key")]
    pub source_key: String,

    /// 产物容器
    #[serde(default = "default_destination_container")]
    pub destination_container: String,

    /// 产物 key 前缀
    #[serde(default = "default_destination_prefix")]
    pub destination_prefix: String,

    /// 单块最大字符数
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// 全部块成功后是否写入清单对象
    #[serde(default = "default_write_manifest")]
    pub write_manifest: bool,
}

fn default_source_container() -> String {
    "documents".to_string()
}

fn default_source_key() -> String {
    "inbox/document.pdf".to_string()
}

fn default_destination_container() -> String {
    "audiobooks".to_string()
}

fn default_destination_prefix() -> String {
    "audio".to_string()
}

fn default_max_chunk_chars() -> usize {
    crate::domain::DEFAULT_MAX_CHUNK_CHARS
}

fn default_write_manifest() -> bool {
    true
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            source_container: default_source_container(),
            source_key: default_source_key(),
            destination_container: default_destination_container(),
            destination_prefix: default_destination_prefix(),
            max_chunk_chars: default_max_chunk_chars(),
            write_manifest: default_write_manifest(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.ocr.url, "http://localhost:9100");
        assert_eq!(config.ocr.poll_interval_secs, 3);
        assert_eq!(config.tts.voice_id, "Arthur");
        assert_eq!(config.pipeline.max_chunk_chars, 2900);
        assert!(config.pipeline.write_manifest);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5080");
    }

    #[test]
    fn test_tts_defaults_match_deployment() {
        let config = TtsConfig::default();
        assert_eq!(config.output_format, AudioFormat::Mp3);
        assert_eq!(config.engine, SynthesisEngine::Neural);
    }
}
