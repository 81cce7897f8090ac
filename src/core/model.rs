//! 拼接流程的基础数据类型

use crate::audio::ContainerFormat;
use std::path::{Path, PathBuf};

/// 扫描得到的音频文件引用（扫描后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct AudioFileRef {
    path: PathBuf,
    format: ContainerFormat,
}

impl AudioFileRef {
    pub fn new(path: impl Into<PathBuf>, format: ContainerFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// 按扩展名识别格式，不在白名单内返回 `None`
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let format = ContainerFormat::from_path(&path)?;
        Some(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ContainerFormat {
        self.format
    }

    /// 文件名（用于日志显示）
    pub fn file_name(&self) -> String {
        crate::tools::utils::extract_filename_lossy(&self.path)
    }
}

/// 文件引用 + 实测时长（毫秒）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AudioInfo {
    pub file: AudioFileRef,
    pub duration_ms: u64,
}

impl AudioInfo {
    pub fn new(file: AudioFileRef, duration_ms: u64) -> Self {
        Self { file, duration_ms }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn format(&self) -> ContainerFormat {
        self.file.format()
    }
}

/// 按时长升序排序（稳定排序，时长相同保持扫描顺序）
pub fn sort_by_duration(infos: &mut [AudioInfo]) {
    infos.sort_by_key(|info| info.duration_ms);
}

/// 毫秒 → 秒（保留一位小数的显示文本）
#[inline]
pub fn format_seconds_1dp(duration_ms: u64) -> String {
    format!("{:.1}", duration_ms as f64 / 1000.0)
}
