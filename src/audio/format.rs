//! 容器格式信息模块
//!
//! 定义扫描白名单中的音频容器格式，以及导出时对应的编码参数。

use std::fmt;
use std::path::Path;

/// 支持的音频容器格式
///
/// 与扫描白名单一一对应：mp3, wav, flac, ogg, m4a, aac
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    Mp3,
    Wav,
    Flac,
    Ogg,
    M4a,
    Aac,
}

impl ContainerFormat {
    /// 所有受支持的格式（顺序即白名单顺序）
    pub const ALL: [ContainerFormat; 6] = [
        ContainerFormat::Mp3,
        ContainerFormat::Wav,
        ContainerFormat::Flac,
        ContainerFormat::Ogg,
        ContainerFormat::M4a,
        ContainerFormat::Aac,
    ];

    /// 从扩展名识别格式（大小写不敏感）
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lower = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == lower)
    }

    /// 从文件路径识别格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// 小写扩展名（不含点）
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::M4a => "m4a",
            Self::Aac => "aac",
        }
    }

    /// FFmpeg muxer名称
    pub fn ffmpeg_muxer(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::M4a => "ipod",
            Self::Aac => "adts",
        }
    }

    /// FFmpeg编码器名称
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Mp3 => "libmp3lame",
            Self::Wav => "pcm_s16le",
            Self::Flac => "flac",
            Self::Ogg => "libvorbis",
            Self::M4a | Self::Aac => "aac",
        }
    }

    /// 是否可以在进程内直接编码（无需FFmpeg）
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Wav)
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}
