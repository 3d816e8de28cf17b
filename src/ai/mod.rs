//! AI 服务接入
//!
//! `ReceiptModel` 是唯一的抽象点: 服务端只依赖这个 trait,
//! 生产环境用 Gemini, 测试用 mock.

pub mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;
pub use prompt::RECEIPT_PROMPT;

use async_trait::async_trait;
use thiserror::Error;

/// 图片部分: 原始 base64 + MIME 类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: String,
}

/// AI 调用失败 (网络 / 鉴权 / 配额 / 空回复)
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request to AI provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("AI provider returned no text")]
    EmptyReply,
}

/// 多模态模型: 图片 + 提示词 -> 原始文本回复
#[async_trait]
pub trait ReceiptModel: Send + Sync {
    async fn generate(&self, image: &ImagePart, prompt: &str) -> Result<String, ModelError>;
}
