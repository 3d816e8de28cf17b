use super::expand::to_bill_items;
use crate::models::{BillItem, ScanRequest};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// 客户端错误: 网络 / 服务端状态码 / 响应体解析, 统一为一个类型
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No se pudo conectar con el servidor: {0}")]
    Transport(#[from] reqwest::Error),

    /// 服务端返回的 error 字段, 原样透出
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    #[error("Respuesta no válida del servidor: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    error: Option<String>,
}

/// /api/scan 客户端适配器
#[derive(Debug, Clone)]
pub struct ScanClient {
    http: Client,
    endpoint: String,
}

impl ScanClient {
    /// `endpoint` 为完整的扫描地址, 例如 `http://127.0.0.1:8080/api/scan`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// 扫描收据, 返回展开后的账单条目
    pub async fn extract_items(&self, base64_image: &str) -> Result<Vec<BillItem>, ClientError> {
        let request = ScanRequest {
            base64_image: base64_image.to_string(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = server_error_message(status, &body);
            tracing::warn!("Scan request failed with {}: {}", status, message);
            return Err(ClientError::Server { status, message });
        }

        let parsed: Value = serde_json::from_slice(&body)?;
        Ok(to_bill_items(&parsed))
    }
}

/// 优先使用服务端 JSON 中的 error 字段
fn server_error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ServerErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| format!("Error del servidor: {}.", status.as_u16()))
}
