//! HTTP Error Handling - 调用边界的错误转换
//!
//! 管线错误只在这里被捕获：记录日志并整形为失败响应，
//! 不构造部分成功信息（已发布的产物不回滚）。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorBody;
use crate::application::PipelineError;

/// 调用失败
#[derive(Debug)]
pub struct InvocationError(pub PipelineError);

impl From<PipelineError> for InvocationError {
    fn from(e: PipelineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for InvocationError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Pipeline invocation failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: "Internal server error".to_string(),
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
