//! FFmpeg桥接编码器
//!
//! 进程内只能编码WAV；MP3/FLAC/OGG/M4A/AAC 通过管道交给 FFmpeg 子进程：
//! stdin 写入 S16LE PCM，stdout 读回封装好的容器字节。

use crate::error::{self, AudioError, AudioResult};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use super::buffer::AudioBuffer;
use super::format::ContainerFormat;

/// FFmpeg安装指南（跨平台）
pub const FFMPEG_INSTALL_GUIDE: &str = r#"
FFmpeg is required to export MP3/FLAC/OGG/M4A/AAC / 导出MP3/FLAC/OGG/M4A/AAC需要安装FFmpeg

Installation / 安装方法:
  macOS:   brew install ffmpeg
  Windows: https://www.gyan.dev/ffmpeg/builds/
           或使用: winget install Gyan.FFmpeg
  Linux:
    - Ubuntu/Debian: sudo apt install ffmpeg
    - Fedora/RHEL:   sudo dnf install ffmpeg
    - Arch:          sudo pacman -S ffmpeg

Official site / 官方网站: https://ffmpeg.org/download.html
"#;

/// FFmpeg编码器
#[derive(Debug, Clone)]
pub struct FFmpegEncoder {
    ffmpeg_path: PathBuf,
}

impl FFmpegEncoder {
    /// 检测FFmpeg是否可用
    pub fn is_available() -> bool {
        Self::find_ffmpeg_path().is_some()
    }

    /// 定位FFmpeg，不可用时返回编码错误
    pub fn locate() -> AudioResult<Self> {
        Self::find_ffmpeg_path()
            .map(|ffmpeg_path| Self { ffmpeg_path })
            .ok_or_else(|| AudioError::EncodingError(FFMPEG_INSTALL_GUIDE.to_string()))
    }

    /// 查找FFmpeg可执行文件路径（跨平台，结果缓存）
    fn find_ffmpeg_path() -> Option<PathBuf> {
        static FFMPEG: OnceLock<Option<PathBuf>> = OnceLock::new();
        FFMPEG
            .get_or_init(|| {
                let mut candidates = vec![PathBuf::from(if cfg!(target_os = "windows") {
                    "ffmpeg.exe"
                } else {
                    "ffmpeg"
                })];

                // 便携部署：与可执行文件同目录
                if let Ok(exe) = std::env::current_exe()
                    && let Some(dir) = exe.parent()
                {
                    candidates.push(dir.join(if cfg!(target_os = "windows") {
                        "ffmpeg.exe"
                    } else {
                        "ffmpeg"
                    }));
                }

                candidates.into_iter().find(|p| {
                    Command::new(p)
                        .arg("-version")
                        .stdout(Stdio::null())
                        .stderr(Stdio::null())
                        .status()
                        .map(|s| s.success())
                        .unwrap_or(false)
                })
            })
            .clone()
    }

    /// 构建FFmpeg命令参数
    fn build_args(buffer: &AudioBuffer, format: ContainerFormat) -> Vec<String> {
        let mut args = vec![
            "-v".to_string(),
            "error".to_string(),
            "-f".to_string(),
            "s16le".to_string(),
            "-ar".to_string(),
            buffer.sample_rate().to_string(),
            "-ac".to_string(),
            buffer.channels().to_string(),
            "-i".to_string(),
            "pipe:0".to_string(),
            "-c:a".to_string(),
            format.ffmpeg_codec().to_string(),
        ];

        if format == ContainerFormat::M4a {
            // 非seekable输出需要分片MP4
            args.extend(["-movflags".to_string(), "+frag_keyframe+empty_moov".to_string()]);
        }

        args.extend([
            "-f".to_string(),
            format.ffmpeg_muxer().to_string(),
            "pipe:1".to_string(),
        ]);
        args
    }

    /// 编码为指定容器格式的字节
    pub fn encode(&self, buffer: &AudioBuffer, format: ContainerFormat) -> AudioResult<Vec<u8>> {
        let pcm = convert_f32_to_s16le(buffer.samples());

        let mut child = Command::new(&self.ffmpeg_path)
            .args(Self::build_args(buffer, format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| error::encoding_error("无法启动FFmpeg / Failed to spawn FFmpeg", e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AudioError::EncodingError("FFmpeg标准输入不可用".to_string()))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| AudioError::EncodingError("FFmpeg标准输出不可用".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| AudioError::EncodingError("FFmpeg标准错误不可用".to_string()))?;

        // 写stdin与读stdout/stderr必须同时进行，否则管道写满会死锁
        let (write_result, read_result, diagnostics) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || {
                let result = stdin.write_all(&pcm);
                drop(stdin);
                result
            });
            let err_reader = scope.spawn(move || {
                let mut text = String::new();
                let _ = stderr.read_to_string(&mut text);
                text
            });

            let mut encoded = Vec::new();
            let read_result = stdout.read_to_end(&mut encoded).map(|_| encoded);

            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            let diagnostics = err_reader.join().unwrap_or_default();
            (write_result, read_result, diagnostics)
        });

        let status = child.wait()?;
        if !status.success() {
            return Err(AudioError::EncodingError(format!(
                "FFmpeg编码失败 / FFmpeg exited with {status}: {}",
                diagnostics.trim()
            )));
        }
        write_result.map_err(|e| error::encoding_error("写入FFmpeg失败", e))?;
        let encoded = read_result.map_err(|e| error::encoding_error("读取FFmpeg输出失败", e))?;

        if encoded.is_empty() {
            return Err(AudioError::EncodingError(
                "FFmpeg未输出任何数据 / FFmpeg produced no output".to_string(),
            ));
        }
        Ok(encoded)
    }
}

/// F32样本转S16LE字节（小端序，截幅到[-1.0, 1.0]）
pub fn convert_f32_to_s16le(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&s| f32_to_i16(s).to_le_bytes())
        .collect()
}

#[inline]
pub(crate) fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}
