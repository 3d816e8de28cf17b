use serde::Serialize;
use serde_json::Value;

/// 扫描请求体
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub base64_image: String,
}

/// AI 返回的一行商品 (已通过校验)
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLineItem {
    pub name: String,
    /// 缺失或非正数时为 None, 按 1 处理
    pub quantity: Option<f64>,
    /// 行总价
    pub price: f64,
}

/// 某一行被丢弃的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotAnObject,
    MissingName,
    MissingPrice,
    NonPositivePrice,
}

impl ExtractedLineItem {
    /// 校验一条 AI 输出: name 为非空字符串, price 为正数
    pub fn decode(entry: &Value) -> Result<Self, RejectReason> {
        let obj = entry.as_object().ok_or(RejectReason::NotAnObject)?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(RejectReason::MissingName)?;

        let price = obj
            .get("price")
            .and_then(Value::as_f64)
            .ok_or(RejectReason::MissingPrice)?;
        if price <= 0.0 {
            return Err(RejectReason::NonPositivePrice);
        }

        let quantity = obj
            .get("quantity")
            .and_then(Value::as_f64)
            .filter(|q| *q > 0.0);

        Ok(Self {
            name: name.to_string(),
            quantity,
            price,
        })
    }

    /// 有效数量, 默认 1
    pub fn effective_quantity(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }
}
