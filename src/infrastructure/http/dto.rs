//! Data Transfer Objects - 调用边界的请求/响应结构

use serde::{Deserialize, Serialize};

/// 管线调用请求
///
/// 字段均可省略，省略时使用配置的默认文档位置
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunPipelineRequest {
    /// 源文档容器，覆盖配置值
    pub source_container: Option<String>,
    /// 源文档 key，覆盖配置值
    pub source_key: Option<String>,
}

/// 管线调用成功响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPipelineResponse {
    /// 人类可读摘要
    pub message: String,
    /// 产出的块数
    pub number_of_chunks: usize,
    /// OCR 任务 ID
    pub job_id: String,
}

/// 管线调用失败响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
}
