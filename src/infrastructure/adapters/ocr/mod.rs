//! OCR Adapters

mod fake_ocr_client;
mod http_ocr_client;

pub use fake_ocr_client::FakeOcrClient;
pub use http_ocr_client::{HttpOcrClient, HttpOcrClientConfig};
