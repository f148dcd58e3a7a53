//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `LECTERN_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `LECTERN_SERVER__PORT=8080`
/// - `LECTERN_OCR__URL=http://ocr-server:9100`
/// - `LECTERN_TTS__VOICE_ID=Joanna`
/// - `LECTERN_PIPELINE__SOURCE_KEY=inbox/report.pdf`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("ocr.url", "http://localhost:9100")?
        .set_default("ocr.timeout_secs", 30)?
        .set_default("ocr.poll_interval_secs", 3)?
        .set_default("ocr.max_poll_secs", 300)?
        .set_default("tts.url", "http://localhost:9200")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("tts.voice_id", "Arthur")?
        .set_default("tts.output_format", "mp3")?
        .set_default("tts.engine", "neural")?
        .set_default("storage.url", "http://localhost:9300")?
        .set_default("storage.timeout_secs", 60)?
        .set_default("pipeline.source_container", "documents")?
        .set_default("pipeline.source_key", "inbox/document.pdf")?
        .set_default("pipeline.destination_container", "audiobooks")?
        .set_default("pipeline.destination_prefix", "audio")?
        .set_default("pipeline.max_chunk_chars", 2900)?
        .set_default("pipeline.write_manifest", true)?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: LECTERN_
    // 层级分隔符: __ (双下划线)
    // 例如: LECTERN_OCR__URL=http://ocr-server:9100
    builder = builder.add_source(
        Environment::with_prefix("LECTERN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.ocr.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "OCR URL cannot be empty".to_string(),
        ));
    }

    if config.ocr.poll_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "OCR poll interval cannot be 0".to_string(),
        ));
    }

    if config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.voice_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS voice id cannot be empty".to_string(),
        ));
    }

    if config.storage.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage URL cannot be empty".to_string(),
        ));
    }

    if config.pipeline.max_chunk_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Max chunk chars cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("OCR URL: {}", config.ocr.url);
    tracing::info!(
        "OCR Poll: every {}s, up to {}s",
        config.ocr.poll_interval_secs,
        config.ocr.max_poll_secs
    );
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!(
        "TTS Voice: {} ({}, {})",
        config.tts.voice_id,
        config.tts.engine.as_str(),
        config.tts.output_format.as_str()
    );
    tracing::info!("Storage URL: {}", config.storage.url);
    tracing::info!(
        "Source: {}/{}",
        config.pipeline.source_container,
        config.pipeline.source_key
    );
    tracing::info!(
        "Destination: {}/{}/",
        config.pipeline.destination_container,
        config.pipeline.destination_prefix
    );
    tracing::info!("Max Chunk Chars: {}", config.pipeline.max_chunk_chars);
    tracing::info!("Write Manifest: {}", config.pipeline.write_manifest);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5080);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_ocr_url() {
        let mut config = AppConfig::default();
        config.ocr.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_poll_interval() {
        let mut config = AppConfig::default();
        config.ocr.poll_interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_voice() {
        let mut config = AppConfig::default();
        config.tts.voice_id = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_chunk_chars() {
        let mut config = AppConfig::default();
        config.pipeline.max_chunk_chars = 0;
        assert!(validate_config(&config).is_err());
    }
}
