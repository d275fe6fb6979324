//! 负责合并统计数据的定义与格式化输出

use tracing::debug;

/// 规则合并统计信息
/// 记录单个规则集合并过程中的各类指标：
/// 1. 源文本数量/读取行数
/// 2. 被跳过的空行、注释行、重复行
/// 3. 格式错误与未知分类的处理结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanStats {
    // ========== 输入统计 ==========
    /// 参与合并的源文本数量
    pub source_documents: usize,
    /// 读取的总行数
    pub lines_read: usize,

    // ========== 跳过统计 ==========
    /// 空行数量
    pub blank_lines: usize,
    /// 注释行数量
    pub comment_lines: usize,
    /// 重复行数量（同源或跨源）
    pub duplicate_lines: usize,

    // ========== 异常行统计 ==========
    /// 保留的格式错误行（排序到末尾）
    pub malformed_kept: usize,
    /// 丢弃的格式错误行
    pub malformed_dropped: usize,
    /// 丢弃的未知分类行
    pub unknown_dropped: usize,

    /// 最终保留的规则行数
    pub kept_lines: usize,
}

impl CleanStats {
    /// 被丢弃的行数总和
    pub fn discarded(&self) -> usize {
        self.blank_lines
            + self.comment_lines
            + self.duplicate_lines
            + self.malformed_dropped
            + self.unknown_dropped
    }

    /// 格式化输出统计信息（结构化日志）
    pub fn print_stats(&self, name: &str, total_time: std::time::Duration) {
        debug!(
            "[{}] 规则合并完成 | 耗时：{:?} | 源文本：{} | 读取行数：{} | 保留：{} | 丢弃：{}",
            name,
            total_time,
            self.source_documents,
            self.lines_read,
            self.kept_lines,
            self.discarded()
        );
        debug!(
            "[{}] 跳过明细：空行 {} | 注释 {} | 重复 {} | 格式错误（保留 {} / 丢弃 {}）| 未知分类丢弃 {}",
            name,
            self.blank_lines,
            self.comment_lines,
            self.duplicate_lines,
            self.malformed_kept,
            self.malformed_dropped,
            self.unknown_dropped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_accounted_for() {
        let stats = CleanStats {
            source_documents: 2,
            lines_read: 10,
            blank_lines: 2,
            comment_lines: 3,
            duplicate_lines: 1,
            malformed_kept: 1,
            malformed_dropped: 0,
            unknown_dropped: 0,
            kept_lines: 4,
        };
        assert_eq!(stats.discarded() + stats.kept_lines, stats.lines_read);
    }
}
