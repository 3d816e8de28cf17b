#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use receipt_scan::ai::{ImagePart, ModelError, ReceiptModel};
use receipt_scan::api::{self, AppState};
use std::sync::{Arc, Mutex};

pub const IMAGE: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQ";
pub const BODY_LIMIT: usize = 1024 * 1024;

/// 固定回复的模型, 记录收到的图片
pub struct MockModel {
    reply: Result<String, String>,
    pub seen: Mutex<Vec<(ImagePart, String)>>,
}

impl MockModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ReceiptModel for MockModel {
    async fn generate(&self, image: &ImagePart, prompt: &str) -> Result<String, ModelError> {
        self.seen
            .lock()
            .unwrap()
            .push((image.clone(), prompt.to_string()));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ModelError::Api {
                status: 403,
                message: message.clone(),
            }),
        }
    }
}

pub fn app_with(model: Arc<MockModel>) -> Router {
    api::router(AppState::with_model(model), BODY_LIMIT)
}

/// 在随机端口启动服务, 返回扫描地址
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/scan", addr)
}
