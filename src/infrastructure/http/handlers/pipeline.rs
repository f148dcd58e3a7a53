//! Pipeline Handler - 管线调用入口
//!
//! 一次调用执行一条完整管线。请求体可省略；给出时可覆盖源文档位置。

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::DocumentRef;
use crate::infrastructure::http::dto::{RunPipelineRequest, RunPipelineResponse};
use crate::infrastructure::http::error::InvocationError;
use crate::infrastructure::http::state::AppState;

pub async fn run_pipeline(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RunPipelineRequest>>,
) -> Result<Json<RunPipelineResponse>, InvocationError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let source = DocumentRef::new(
        req.source_container
            .unwrap_or_else(|| state.default_source.container.clone()),
        req.source_key
            .unwrap_or_else(|| state.default_source.key.clone()),
    );

    tracing::info!(source = %source, "Pipeline invocation received");

    let summary = state.pipeline.run(source).await?;

    let prefix = &state.pipeline.config().destination_prefix;
    Ok(Json(RunPipelineResponse {
        message: format!(
            "Created {} audio files in {}/",
            summary.chunk_count, prefix
        ),
        number_of_chunks: summary.chunk_count,
        job_id: summary.job_id,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use crate::application::ports::{OcrJobStatus, TextBlock};
    use crate::application::{PipelineConfig, PollConfig};
    use crate::domain::DocumentRef;
    use crate::infrastructure::adapters::{FakeOcrClient, FakeTtsClient, FakeTtsClientConfig};
    use crate::infrastructure::http::dto::{ErrorBody, RunPipelineResponse};
    use crate::infrastructure::http::routes::create_routes;
    use crate::infrastructure::http::state::AppState;
    use crate::infrastructure::memory::InMemoryObjectStorage;

    fn poll_config() -> PollConfig {
        PollConfig {
            interval: std::time::Duration::from_millis(1),
            max_wait: std::time::Duration::from_secs(60),
        }
    }

    fn app(ocr: Arc<FakeOcrClient>, tts: Arc<FakeTtsClient>) -> axum::Router {
        let state = AppState::new(
            PipelineConfig::default(),
            poll_config(),
            DocumentRef::new("documents", "inbox/report.pdf"),
            ocr,
            tts,
            Arc::new(InMemoryObjectStorage::new()),
        );
        create_routes().with_state(Arc::new(state))
    }

    fn invoke_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/pipeline/run")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_response_shape() {
        let ocr = Arc::new(
            FakeOcrClient::new("job-h1", vec![OcrJobStatus::Succeeded])
                .with_blocks(vec![TextBlock::line("Hello world.")]),
        );
        let tts = Arc::new(FakeTtsClient::with_audio(b"audio".to_vec()));

        let response = app(ocr, tts).oneshot(invoke_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: RunPipelineResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.number_of_chunks, 1);
        assert_eq!(body.job_id, "job-h1");
        assert_eq!(body.message, "Created 1 audio files in audio/");
    }

    #[tokio::test]
    async fn test_failure_returns_500_shape() {
        let ocr = Arc::new(
            FakeOcrClient::new("job-h2", vec![OcrJobStatus::Succeeded])
                .with_blocks(vec![TextBlock::line("Hello world.")]),
        );
        let tts = Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            audio_data: b"audio".to_vec(),
            fail_on_call: Some(1),
        }));

        let response = app(ocr, tts).oneshot(invoke_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Internal server error");
        assert!(body.error.contains("synthesis"), "error: {}", body.error);
    }

    #[tokio::test]
    async fn test_missing_body_uses_configured_source() {
        let ocr = Arc::new(FakeOcrClient::new(
            "job-h3",
            vec![OcrJobStatus::Succeeded],
        ));
        let tts = Arc::new(FakeTtsClient::with_audio(b"audio".to_vec()));

        let request = Request::builder()
            .method("POST")
            .uri("/api/pipeline/run")
            .body(Body::empty())
            .unwrap();

        let response = app(ocr, tts).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
