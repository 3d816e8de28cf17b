//! 客户端适配器: 调用 /api/scan 并把结果展开为账单条目

pub mod expand;
pub mod scan_client;

pub use expand::{decode_items, expand_item, to_bill_items};
pub use scan_client::{ClientError, ScanClient};
