//! 工具函数模块
//!
//! 提供文件路径处理、时长显示等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 获取父目录，如果不存在则返回当前目录
    #[inline]
    pub fn get_parent_dir(path: &Path) -> &Path {
        path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// 时长显示工具函数
pub mod duration {
    /// 毫秒 → `m:ss.s` 形式（用于表格输出）
    pub fn format_clock(duration_ms: u64) -> String {
        let minutes = duration_ms / 60_000;
        let seconds = (duration_ms % 60_000) as f64 / 1000.0;
        format!("{minutes}:{seconds:04.1}")
    }
}

// 重新导出为平级函数
pub use duration::format_clock;
pub use path::{extract_filename_lossy, get_parent_dir};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_path_helpers() {
        assert_eq!(extract_filename_lossy(Path::new("/a/b/c.wav")), "c.wav");
        assert_eq!(extract_filename_lossy(Path::new("/")), "");
        assert_eq!(get_parent_dir(Path::new("c.wav")), Path::new(""));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(15_000), "0:15.0");
        assert_eq!(format_clock(65_300), "1:05.3");
        assert_eq!(format_clock(0), "0:00.0");
    }
}
