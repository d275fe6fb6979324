//! 工具模块：日志预览与时间格式化
pub mod log_format;
pub mod timestamp;

pub use self::log_format::preview_line;
pub use self::timestamp::{format_timestamp, now_with_offset};
