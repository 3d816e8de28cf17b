pub mod extractor;

pub use extractor::{clean_and_parse, split_data_url, ReceiptExtractor};
