use crate::ai::{ImagePart, ReceiptModel, RECEIPT_PROMPT};
use crate::error::ScanError;
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

fn data_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^data:(image/[A-Za-z0-9_]+);base64,(.*)$").expect("valid data-url regex"))
}

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").expect("valid fence regex"))
}

/// 拆分 data-URL 为 MIME 类型和原始 base64
pub fn split_data_url(data_url: &str) -> Option<ImagePart> {
    let caps = data_url_regex().captures(data_url)?;
    Some(ImagePart {
        mime_type: caps[1].to_string(),
        data: caps[2].to_string(),
    })
}

/// 清理 AI 回复 (去空白, 去 markdown 代码块) 后解析为 JSON
pub fn clean_and_parse(raw: &str) -> Result<Value, serde_json::Error> {
    let mut text = raw.trim();
    if let Some(body) = fence_regex().captures(text).and_then(|caps| caps.get(2)) {
        if !body.as_str().is_empty() {
            text = body.as_str().trim();
        }
    }
    serde_json::from_str(text)
}

/// 收据提取服务: 图片 -> AI -> JSON
pub struct ReceiptExtractor {
    model: Arc<dyn ReceiptModel>,
}

impl ReceiptExtractor {
    pub fn new(model: Arc<dyn ReceiptModel>) -> Self {
        Self { model }
    }

    /// 返回 AI 解析出的 JSON, 内部结构不在这里校验
    pub async fn extract(&self, base64_image: &str) -> Result<Value, ScanError> {
        let image = split_data_url(base64_image).ok_or(ScanError::InvalidImageFormat)?;
        tracing::info!(
            "Scanning receipt: {} ({} base64 chars)",
            image.mime_type,
            image.data.len()
        );

        let reply = self.model.generate(&image, RECEIPT_PROMPT).await?;
        let parsed = clean_and_parse(&reply)?;

        if let Value::Array(items) = &parsed {
            tracing::info!("AI returned {} line items", items.len());
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_valid_data_url() {
        let part = split_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(part.mime_type, "image/jpeg");
        assert_eq!(part.data, "/9j/4AAQ");
    }

    #[test]
    fn rejects_non_image_data_urls() {
        assert!(split_data_url("/9j/4AAQ").is_none());
        assert!(split_data_url("data:text/plain;base64,aGVsbG8=").is_none());
        assert!(split_data_url("data:image/png,raw").is_none());
        assert!(split_data_url("").is_none());
    }

    #[test]
    fn mime_subtype_must_be_ascii() {
        assert!(split_data_url("data:image/jpégé;base64,AAAA").is_none());
        assert!(split_data_url("data:image/svg+xml;base64,AAAA").is_none());
        assert!(split_data_url("data:image/x_icon;base64,AAAA").is_some());
    }

    #[test]
    fn parses_plain_json() {
        assert_eq!(
            clean_and_parse("  [{\"name\":\"Tea\",\"quantity\":1,\"price\":2}]\n").unwrap(),
            json!([{"name": "Tea", "quantity": 1, "price": 2}])
        );
    }

    #[test]
    fn strips_markdown_fence_with_language_tag() {
        let raw = "```json\n[{\"name\":\"Soda\",\"quantity\":3,\"price\":6.0}]\n```";
        assert_eq!(
            clean_and_parse(raw).unwrap(),
            json!([{"name": "Soda", "quantity": 3, "price": 6.0}])
        );
    }

    #[test]
    fn strips_bare_fence_and_surrounding_whitespace() {
        let raw = "\n  ```\n[]\n```  \n";
        assert_eq!(clean_and_parse(raw).unwrap(), json!([]));
    }

    #[test]
    fn non_json_is_an_error() {
        assert!(clean_and_parse("Sorry, I can't read this receipt.").is_err());
        assert!(clean_and_parse("```json\n```").is_err());
    }
}
