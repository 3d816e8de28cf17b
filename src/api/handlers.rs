use crate::ai::{GeminiClient, ReceiptModel};
use crate::config::GeminiConfig;
use crate::error::ScanError;
use crate::service::ReceiptExtractor;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

/// AI 后端状态: 启动时确定, 运行期不变
#[derive(Clone)]
pub enum ScanBackend {
    Configured(Arc<ReceiptExtractor>),
    /// 缺少 API key, 所有扫描请求返回 500
    Unconfigured,
}

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub backend: ScanBackend,
}

impl AppState {
    pub fn with_model(model: Arc<dyn ReceiptModel>) -> Self {
        Self {
            backend: ScanBackend::Configured(Arc::new(ReceiptExtractor::new(model))),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            backend: ScanBackend::Unconfigured,
        }
    }

    /// 按配置构建 Gemini 客户端, 没有 API key 时进入未配置状态
    pub fn from_config(config: &GeminiConfig) -> Self {
        match GeminiClient::from_config(config) {
            Some(client) => Self::with_model(Arc::new(client)),
            None => {
                tracing::error!("API_KEY environment variable not set on the server.");
                Self::unconfigured()
            }
        }
    }

    fn extractor(&self) -> Result<&ReceiptExtractor, ScanError> {
        match &self.backend {
            ScanBackend::Configured(extractor) => Ok(extractor.as_ref()),
            ScanBackend::Unconfigured => Err(ScanError::Unconfigured),
        }
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 从请求体取出 base64Image; 非 JSON 的请求体视为缺失
fn base64_image(body: &[u8]) -> Result<String, ScanError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ScanError::MissingImage)?;
    match value.get("base64Image") {
        None | Some(Value::Null) => Err(ScanError::MissingImage),
        Some(Value::String(s)) if s.is_empty() => Err(ScanError::MissingImage),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ScanError::InvalidImageFormat),
    }
}

/// 收据扫描接口
pub async fn scan(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let extractor = state.extractor()?;
        let image = base64_image(&body)?;
        extractor.extract(&image).await
    }
    .await;

    match result {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 非 POST 请求
pub async fn method_not_allowed(method: Method) -> Response {
    ScanError::MethodNotAllowed(method).into_response()
}
