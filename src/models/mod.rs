pub mod bill;
pub mod receipt;

pub use bill::BillItem;
pub use receipt::{ExtractedLineItem, RejectReason, ScanRequest};
