use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 账单条目: 一个数量单位, 可单独分配给参与者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub assigned_to: Vec<String>,
}

impl BillItem {
    /// 新条目, 分配列表为空
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            assigned_to: Vec::new(),
        }
    }
}
