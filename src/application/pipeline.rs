//! Document Pipeline - 管线编排
//!
//! 串联 OCR 轮询、文本提取、分块、逐块合成与上传。
//! 控制流严格线性：块 i 的上传确认之前不会开始块 i+1，
//! 任一步骤失败立即中止剩余块（已上传的产物保留）。

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::application::error::PipelineError;
use crate::application::ocr_poller::{extract_text, OcrPoller, PollConfig};
use crate::application::ports::{
    AudioFormat, ObjectStoragePort, OcrEnginePort, SpeechSynthesizerPort, SynthesisEngine,
    SynthesisRequest, UploadError, UploadTarget,
};
use crate::domain::{artifact_key, chunk_text, manifest_key, ChunkConfig, DocumentRef};

/// 管线配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 产物容器
    pub destination_container: String,
    /// 产物 key 前缀
    pub destination_prefix: String,
    /// 合成音色
    pub voice_id: String,
    /// 音频输出格式
    pub output_format: AudioFormat,
    /// 合成引擎档位
    pub engine: SynthesisEngine,
    /// 单块最大字符数
    pub max_chunk_chars: usize,
    /// 全部块成功后是否写入清单对象
    pub write_manifest: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            destination_container: "audiobooks".to_string(),
            destination_prefix: "audio".to_string(),
            voice_id: "Arthur".to_string(),
            output_format: AudioFormat::Mp3,
            engine: SynthesisEngine::Neural,
            max_chunk_chars: crate::domain::DEFAULT_MAX_CHUNK_CHARS,
            write_manifest: true,
        }
    }
}

/// 管线运行摘要
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    /// OCR 任务 ID
    pub job_id: String,
    /// 产出的块数（等于产物数）
    pub chunk_count: usize,
    /// 按块序排列的产物 key
    pub artifact_keys: Vec<String>,
}

/// 运行清单，最后写入
///
/// 清单缺失即可判定该次运行未完整结束
#[derive(Debug, Serialize)]
struct PipelineManifest<'a> {
    job_id: &'a str,
    source_container: &'a str,
    source_key: &'a str,
    chunk_count: usize,
    artifacts: &'a [String],
    created_at: String,
}

/// 文档转语音管线
pub struct DocumentPipeline {
    config: PipelineConfig,
    ocr_poller: OcrPoller,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    storage: Arc<dyn ObjectStoragePort>,
}

impl DocumentPipeline {
    pub fn new(
        config: PipelineConfig,
        ocr_engine: Arc<dyn OcrEnginePort>,
        poll_config: PollConfig,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        storage: Arc<dyn ObjectStoragePort>,
    ) -> Self {
        Self {
            config,
            ocr_poller: OcrPoller::new(ocr_engine, poll_config),
            synthesizer,
            storage,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 执行一次完整管线
    ///
    /// 提取文本为空时产出零个产物，仍视为成功
    pub async fn run(&self, source: DocumentRef) -> Result<PipelineSummary, PipelineError> {
        let ocr = self.ocr_poller.run(&source).await?;

        let full_text = extract_text(&ocr.blocks);
        let chunks = chunk_text(
            &full_text,
            &ChunkConfig {
                max_chunk_chars: self.config.max_chunk_chars,
            },
        );

        tracing::info!(
            job_id = %ocr.job_id,
            text_chars = full_text.chars().count(),
            chunks = chunks.len(),
            "Split text into chunks"
        );

        let stem = source.stem().to_string();
        let mut artifact_keys: Vec<String> = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let index = i + 1;

            let segment = self
                .synthesizer
                .synthesize(SynthesisRequest {
                    text: chunk.clone(),
                    voice_id: self.config.voice_id.clone(),
                    output_format: self.config.output_format,
                    engine: self.config.engine,
                })
                .await?;

            let key = artifact_key(
                &self.config.destination_prefix,
                &stem,
                index,
                self.config.output_format.extension(),
            );
            let target = UploadTarget::new(
                &self.config.destination_container,
                &key,
                segment.content_type,
            );

            self.storage.put_stream(&target, segment.stream).await?;

            tracing::info!(chunk = index, total = chunks.len(), key = %key, "Uploaded audio segment");
            artifact_keys.push(key);
        }

        if self.config.write_manifest {
            self.write_manifest(&ocr.job_id, &source, &stem, &artifact_keys)
                .await?;
        }

        Ok(PipelineSummary {
            job_id: ocr.job_id,
            chunk_count: artifact_keys.len(),
            artifact_keys,
        })
    }

    async fn write_manifest(
        &self,
        job_id: &str,
        source: &DocumentRef,
        stem: &str,
        artifacts: &[String],
    ) -> Result<(), PipelineError> {
        let manifest = PipelineManifest {
            job_id,
            source_container: &source.container,
            source_key: &source.key,
            chunk_count: artifacts.len(),
            artifacts,
            created_at: Utc::now().to_rfc3339(),
        };

        let data = serde_json::to_vec(&manifest)
            .map_err(|e| UploadError::ServiceError(format!("manifest encode: {}", e)))?;

        let key = manifest_key(&self.config.destination_prefix, stem);
        let target = UploadTarget::new(&self.config.destination_container, &key, "application/json");

        self.storage.put_bytes(&target, data).await?;

        tracing::info!(key = %key, artifacts = artifacts.len(), "Wrote run manifest");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::ports::{OcrJobStatus, TextBlock};
    use crate::infrastructure::adapters::{FakeOcrClient, FakeTtsClient, FakeTtsClientConfig};
    use crate::infrastructure::memory::InMemoryObjectStorage;

    fn poll_config() -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(1),
            max_wait: Duration::from_secs(60),
        }
    }

    fn pipeline_config(max_chunk_chars: usize) -> PipelineConfig {
        PipelineConfig {
            max_chunk_chars,
            ..PipelineConfig::default()
        }
    }

    fn source() -> DocumentRef {
        DocumentRef::new("documents", "inbox/report.pdf")
    }

    #[tokio::test]
    async fn test_single_chunk_end_to_end() {
        let ocr = Arc::new(
            FakeOcrClient::new("job-e2e", vec![OcrJobStatus::Succeeded]).with_blocks(vec![
                TextBlock::line("Hello world."),
                TextBlock::line("This is page one."),
            ]),
        );
        let tts = Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            audio_data: b"fake-mp3-bytes".to_vec(),
            fail_on_call: None,
        }));
        let storage = Arc::new(InMemoryObjectStorage::new());

        let pipeline = DocumentPipeline::new(
            pipeline_config(2900),
            ocr,
            poll_config(),
            tts,
            storage.clone(),
        );

        let summary = pipeline.run(source()).await.unwrap();

        assert_eq!(summary.job_id, "job-e2e");
        assert_eq!(summary.chunk_count, 1);
        assert!(summary.artifact_keys[0].ends_with("_part1.mp3"));

        let stored = storage
            .get("audiobooks", "audio/report_part1.mp3")
            .expect("artifact missing");
        assert_eq!(stored.data, b"fake-mp3-bytes");
        assert_eq!(stored.content_type, "audio/mpeg");

        // 全部块成功后写入清单
        assert!(storage
            .get("audiobooks", "audio/report_manifest.json")
            .is_some());
    }

    #[tokio::test]
    async fn test_synthesis_failure_aborts_remaining_chunks() {
        // "aaaa bbbb cccc" 在上限 5 下切成 3 块
        let ocr = Arc::new(
            FakeOcrClient::new("job-abort", vec![OcrJobStatus::Succeeded])
                .with_blocks(vec![TextBlock::line("aaaa bbbb cccc")]),
        );
        let tts = Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            audio_data: b"audio".to_vec(),
            fail_on_call: Some(2),
        }));
        let storage = Arc::new(InMemoryObjectStorage::new());

        let pipeline = DocumentPipeline::new(
            pipeline_config(5),
            ocr,
            poll_config(),
            tts.clone(),
            storage.clone(),
        );

        let err = pipeline.run(source()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Synthesis(_)));

        // 块 1 已发布且保留，块 3 从未尝试
        assert!(storage.get("audiobooks", "audio/report_part1.mp3").is_some());
        assert!(storage.get("audiobooks", "audio/report_part3.mp3").is_none());
        assert_eq!(tts.call_count(), 2);

        // 部分失败的运行没有清单
        assert!(storage
            .get("audiobooks", "audio/report_manifest.json")
            .is_none());
    }

    #[tokio::test]
    async fn test_upload_failure_aborts() {
        let ocr = Arc::new(
            FakeOcrClient::new("job-upload", vec![OcrJobStatus::Succeeded])
                .with_blocks(vec![TextBlock::line("some text")]),
        );
        let tts = Arc::new(FakeTtsClient::with_audio(b"audio".to_vec()));
        let storage = Arc::new(InMemoryObjectStorage::new().failing());

        let pipeline = DocumentPipeline::new(
            pipeline_config(2900),
            ocr,
            poll_config(),
            tts,
            storage,
        );

        let err = pipeline.run(source()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Upload(_)));
    }

    #[tokio::test]
    async fn test_empty_text_completes_with_zero_artifacts() {
        let ocr = Arc::new(FakeOcrClient::new(
            "job-empty",
            vec![OcrJobStatus::Succeeded],
        ));
        let tts = Arc::new(FakeTtsClient::with_audio(b"audio".to_vec()));
        let storage = Arc::new(InMemoryObjectStorage::new());

        let pipeline = DocumentPipeline::new(
            pipeline_config(2900),
            ocr,
            poll_config(),
            tts.clone(),
            storage.clone(),
        );

        let summary = pipeline.run(source()).await.unwrap();

        assert_eq!(summary.chunk_count, 0);
        assert!(summary.artifact_keys.is_empty());
        assert_eq!(tts.call_count(), 0);
        // 零块运行同样收尾：只有清单
        assert_eq!(storage.object_count(), 1);
    }

    #[tokio::test]
    async fn test_rerun_overwrites_same_keys() {
        let make_ocr = || {
            Arc::new(
                FakeOcrClient::new("job-idem", vec![OcrJobStatus::Succeeded])
                    .with_blocks(vec![TextBlock::line("identical content")]),
            )
        };
        let tts = Arc::new(FakeTtsClient::with_audio(b"audio".to_vec()));
        let storage = Arc::new(InMemoryObjectStorage::new());

        let first = DocumentPipeline::new(
            pipeline_config(2900),
            make_ocr(),
            poll_config(),
            tts.clone(),
            storage.clone(),
        )
        .run(source())
        .await
        .unwrap();
        let count_after_first = storage.object_count();

        let second = DocumentPipeline::new(
            pipeline_config(2900),
            make_ocr(),
            poll_config(),
            tts,
            storage.clone(),
        )
        .run(source())
        .await
        .unwrap();

        // 相同输入派生相同 key，重复运行覆盖而非新增
        assert_eq!(first.artifact_keys, second.artifact_keys);
        assert_eq!(storage.object_count(), count_after_first);
    }
}
