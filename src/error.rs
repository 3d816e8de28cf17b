use crate::ai::ModelError;
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const UNCONFIGURED_MESSAGE: &str = "La variable de entorno API_KEY no está configurada en el servidor. La aplicación no puede conectarse al servicio de IA. Agregue la API_KEY a las variables de entorno de su proyecto.";
pub const MISSING_IMAGE_MESSAGE: &str = "Falta base64Image en el cuerpo de la solicitud";
pub const INVALID_IMAGE_MESSAGE: &str =
    "Formato de imagen no válido. Se esperaba una cadena base64 con data-URL.";
pub const UPSTREAM_MESSAGE: &str = "No se pudo procesar el recibo con el servicio de IA. Verifique que su API_KEY sea válida y que la imagen sea clara.";

/// /api/scan 的错误类型, 每个变体对应一种 HTTP 响应
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Method {0} Not Allowed")]
    MethodNotAllowed(Method),

    #[error("{}", UNCONFIGURED_MESSAGE)]
    Unconfigured,

    #[error("{}", MISSING_IMAGE_MESSAGE)]
    MissingImage,

    #[error("{}", INVALID_IMAGE_MESSAGE)]
    InvalidImageFormat,

    #[error("AI call failed: {0}")]
    Model(#[from] ModelError),

    #[error("AI reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 错误响应体, details 只在上游失败时出现
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ScanError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScanError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ScanError::MissingImage | ScanError::InvalidImageFormat => StatusCode::BAD_REQUEST,
            ScanError::Unconfigured | ScanError::Model(_) | ScanError::Parse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ScanError::Model(e) => ErrorBody {
                error: UPSTREAM_MESSAGE.to_string(),
                details: Some(e.to_string()),
            },
            ScanError::Parse(e) => ErrorBody {
                error: UPSTREAM_MESSAGE.to_string(),
                details: Some(e.to_string()),
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Error in /api/scan: {}", self);
        }

        let body = Json(self.body());
        match self {
            ScanError::MethodNotAllowed(_) => {
                (status, [(header::ALLOW, "POST")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
