use crate::models::{BillItem, ExtractedLineItem};
use serde_json::Value;

/// 超过该数量不拆分, 防止异常的 AI 输出生成海量条目
pub const MAX_SPLIT_UNITS: u32 = 1000;

/// 过滤 AI 输出中不合格的行; 非数组视为无商品
pub fn decode_items(parsed: &Value) -> Vec<ExtractedLineItem> {
    let Some(entries) = parsed.as_array() else {
        tracing::debug!("Scan result is not an array, treating as empty");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| match ExtractedLineItem::decode(entry) {
            Ok(item) => Some(item),
            Err(reason) => {
                tracing::debug!("Dropping line {}: {:?}", idx, reason);
                None
            }
        })
        .collect()
}

/// 整数数量 n > 1 时拆分为 n 条
fn split_count(quantity: f64) -> Option<u32> {
    if quantity > 1.0 && quantity.fract() == 0.0 && quantity <= f64::from(MAX_SPLIT_UNITS) {
        Some(quantity as u32)
    } else {
        None
    }
}

/// 按数量展开为单价条目
pub fn expand_item(item: &ExtractedLineItem) -> Vec<BillItem> {
    match split_count(item.effective_quantity()) {
        None => vec![BillItem::new(item.name.clone(), item.price)],
        Some(n) => {
            let unit_price = item.price / f64::from(n);
            (1..=n)
                .map(|k| BillItem::new(format!("{} ({}/{})", item.name, k, n), unit_price))
                .collect()
        }
    }
}

/// AI JSON -> 账单条目, 保持原始顺序
pub fn to_bill_items(parsed: &Value) -> Vec<BillItem> {
    decode_items(parsed).iter().flat_map(expand_item).collect()
}
