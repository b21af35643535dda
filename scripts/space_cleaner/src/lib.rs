//! 删除文档页面中中文字符之间多余空格的清理器。

pub mod document;
pub mod page_events;
pub mod selector;
mod space_normalizer;
pub mod types;
mod utils;

pub use document::Document;
pub use page_events::{PageEvents, PageHandler, SubscriptionId, clean_content_region, install};
pub use selector::Selector;
pub use space_normalizer::{clean_chinese_spaces, join_wrapped_lines, remove_chinese_spaces};
pub use types::{CleanError, CleanerOptions, DEFAULT_CONTENT_SELECTOR, Element, Node};
pub use utils::is_chinese_char;
