use std::borrow::Cow;

/// 日志中预览规则行：超过 max_chars 个字符时截断并追加省略号
/// 远程源返回 HTML 错误页时，单行可能有数千字符
pub fn preview_line(line: &str, max_chars: usize) -> Cow<'_, str> {
    match line.char_indices().nth(max_chars) {
        Some((end, _)) => Cow::Owned(format!("{}…", &line[..end])),
        None => Cow::Borrowed(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_is_borrowed() {
        assert!(matches!(preview_line("DOMAIN,a.com", 12), Cow::Borrowed("DOMAIN,a.com")));
    }

    #[test]
    fn test_long_line_is_truncated_on_char_boundary() {
        assert_eq!(preview_line("<html><body>", 6), "<html>…");
        assert_eq!(preview_line("规则格式错误", 2), "规则…");
    }
}
