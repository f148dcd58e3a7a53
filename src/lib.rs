//! Lectern - 文档转语音管线服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Chunker: 文本分块（核心算法）
//! - Document: 文档引用与产物命名
//!
//! 应用层 (application/):
//! - Ports: 端口定义（OcrEngine, SpeechSynthesizer, ObjectStorage）
//! - OcrPoller: OCR 任务提交与轮询
//! - Pipeline: 管线编排（OCR → 提取 → 分块 → 逐块合成/上传 → 清单）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 调用边界（一次 POST 触发一条管线）
//! - Adapters: OCR / TTS / 对象存储的 HTTP 客户端与测试 Fake
//! - Memory: 内存对象存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
