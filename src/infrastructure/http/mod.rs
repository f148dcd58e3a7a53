//! HTTP Layer - 调用边界
//!
//! 一次 POST 调用触发一条完整管线，响应携带运行摘要或失败信息

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::InvocationError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
