//! 统一错误处理框架
//!
//! 拼接流程中所有阶段共用的错误类型。除 `DirectoryNotFound` 外，
//! 其余错误均按"单文件 / 单分组"粒度记录，不会中断整个批处理。

use std::fmt;
use std::io;
use std::path::PathBuf;

/// 音频拼接相关的统一错误类型
#[derive(Debug)]
pub enum AudioError {
    /// 输入验证错误（参数非法，如阈值为0）
    InvalidInput(String),

    /// 文件I/O错误
    IoError(io::Error),

    /// 输入目录不存在
    DirectoryNotFound(PathBuf),

    /// 音频格式错误（不支持的容器、缺少音轨等）
    FormatError(String),

    /// 解码错误（单文件级别）
    DecodingError(String),

    /// 编码/写出错误（单分组级别）
    EncodingError(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::InvalidInput(msg) => write!(f, "输入验证失败: {msg}"),
            AudioError::IoError(err) => write!(f, "文件I/O错误: {err}"),
            AudioError::DirectoryNotFound(path) => {
                write!(f, "输入目录不存在: {}", path.display())
            }
            AudioError::FormatError(msg) => write!(f, "音频格式错误: {msg}"),
            AudioError::DecodingError(msg) => write!(f, "音频解码失败: {msg}"),
            AudioError::EncodingError(msg) => write!(f, "音频编码失败: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AudioError {
    fn from(err: io::Error) -> Self {
        AudioError::IoError(err)
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io_err) => AudioError::IoError(io_err),
            other => AudioError::DecodingError(format!("WAV解码错误: {other}")),
        }
    }
}

/// 音频处理操作的标准Result类型
pub type AudioResult<T> = Result<T, AudioError>;

// ==================== 错误转换Helper函数 ====================

/// 创建格式错误的helper函数
#[inline]
pub fn format_error<E: fmt::Display>(context: &str, err: E) -> AudioError {
    AudioError::FormatError(format!("{context}: {err}"))
}

/// 创建解码错误的helper函数
#[inline]
pub fn decoding_error<E: fmt::Display>(context: &str, err: E) -> AudioError {
    AudioError::DecodingError(format!("{context}: {err}"))
}

/// 创建编码错误的helper函数
#[inline]
pub fn encoding_error<E: fmt::Display>(context: &str, err: E) -> AudioError {
    AudioError::EncodingError(format!("{context}: {err}"))
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（用于批量处理统计）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, serde::Serialize)]
pub enum ErrorCategory {
    /// 格式相关错误（不支持的格式、缺少音轨等）
    Format,
    /// 解码相关错误
    Decoding,
    /// 编码/导出相关错误
    Encoding,
    /// I/O相关错误（文件不存在、权限不足、磁盘已满等）
    Io,
    /// 其他未分类错误
    Other,
}

impl ErrorCategory {
    /// 从AudioError提取错误类别
    pub fn from_audio_error(e: &AudioError) -> Self {
        match e {
            AudioError::FormatError(_) => Self::Format,
            AudioError::DecodingError(_) => Self::Decoding,
            AudioError::EncodingError(_) => Self::Encoding,
            AudioError::IoError(_) | AudioError::DirectoryNotFound(_) => Self::Io,
            AudioError::InvalidInput(_) => Self::Other,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Format => "格式错误",
            Self::Decoding => "解码错误",
            Self::Encoding => "编码错误",
            Self::Io => "I/O错误",
            Self::Other => "其他错误",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let cases = [
            (AudioError::FormatError("x".into()), ErrorCategory::Format),
            (AudioError::DecodingError("x".into()), ErrorCategory::Decoding),
            (AudioError::EncodingError("x".into()), ErrorCategory::Encoding),
            (
                AudioError::DirectoryNotFound(PathBuf::from("/missing")),
                ErrorCategory::Io,
            ),
            (AudioError::InvalidInput("x".into()), ErrorCategory::Other),
        ];

        for (error, expected) in cases {
            assert_eq!(ErrorCategory::from_audio_error(&error), expected);
        }
    }

    #[test]
    fn test_directory_not_found_display_contains_path() {
        let err = AudioError::DirectoryNotFound(PathBuf::from("/no/such/dir"));
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_hound_io_error_stays_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let converted: AudioError = hound::Error::IoError(io_err).into();
        assert!(matches!(converted, AudioError::IoError(_)));
    }
}
