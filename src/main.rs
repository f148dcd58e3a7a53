//! Lectern - 文档转语音管线服务
//!
//! 启动流程：加载配置 → 初始化日志 → 构建三个服务客户端 →
//! 装配管线 → 启动 HTTP 服务器（带优雅关闭）

use std::sync::Arc;
use std::time::Duration;

use lectern::application::{PipelineConfig, PollConfig};
use lectern::config::{load_config, print_config};
use lectern::domain::DocumentRef;
use lectern::infrastructure::adapters::{
    HttpObjectStorage, HttpObjectStorageConfig, HttpOcrClient, HttpOcrClientConfig,
    HttpTtsClient, HttpTtsClientConfig,
};
use lectern::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},lectern={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Lectern - 文档转语音管线服务");
    print_config(&config);

    // 创建 OCR 客户端
    let ocr_config = HttpOcrClientConfig {
        base_url: config.ocr.url.clone(),
        timeout_secs: config.ocr.timeout_secs,
    };
    let ocr_engine = Arc::new(HttpOcrClient::new(ocr_config)?);

    // 创建 TTS 客户端
    let tts_config = HttpTtsClientConfig {
        base_url: config.tts.url.clone(),
        timeout_secs: config.tts.timeout_secs,
    };
    let synthesizer = Arc::new(HttpTtsClient::new(tts_config)?);

    // 创建对象存储客户端
    let storage_config = HttpObjectStorageConfig {
        base_url: config.storage.url.clone(),
        timeout_secs: config.storage.timeout_secs,
    };
    let storage = Arc::new(HttpObjectStorage::new(storage_config)?);

    // 装配管线
    let pipeline_config = PipelineConfig {
        destination_container: config.pipeline.destination_container.clone(),
        destination_prefix: config.pipeline.destination_prefix.clone(),
        voice_id: config.tts.voice_id.clone(),
        output_format: config.tts.output_format,
        engine: config.tts.engine,
        max_chunk_chars: config.pipeline.max_chunk_chars,
        write_manifest: config.pipeline.write_manifest,
    };
    let poll_config = PollConfig {
        interval: Duration::from_secs(config.ocr.poll_interval_secs),
        max_wait: Duration::from_secs(config.ocr.max_poll_secs),
    };
    let default_source = DocumentRef::new(
        config.pipeline.source_container.clone(),
        config.pipeline.source_key.clone(),
    );

    let state = AppState::new(
        pipeline_config,
        poll_config,
        default_source,
        ocr_engine,
        synthesizer,
        storage,
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
