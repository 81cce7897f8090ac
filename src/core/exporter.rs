//! 分组导出
//!
//! 对输出的分组：重新解码成员 → 依次拼接 → 按分组格式编码 → 写入输出目录。
//! 文件名形如 `merged_<8位十六进制>_<总时长秒,1位小数>s.<扩展名>`。

use super::model::format_seconds_1dp;
use super::repacker::Group;
use crate::audio::{AudioBuffer, AudioCodec, ContainerFormat};
use crate::error::{AudioError, AudioResult};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// 随机标识长度（十六进制字符）
pub const TOKEN_LEN: usize = 8;

/// 已写出的合并文件
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OutputArtifact {
    pub path: PathBuf,
    /// 名义时长：成员时长之和
    pub duration_ms: u64,
    pub format: ContainerFormat,
    pub member_count: usize,
    /// 按拼接顺序的源文件
    pub sources: Vec<PathBuf>,
}

impl OutputArtifact {
    pub fn file_name(&self) -> String {
        crate::tools::utils::extract_filename_lossy(&self.path)
    }
}

/// 生成输出文件名
pub fn artifact_file_name(token: &str, total_ms: u64, format: ContainerFormat) -> String {
    format!(
        "merged_{token}_{}s.{}",
        format_seconds_1dp(total_ms),
        format.extension()
    )
}

fn generate_token() -> String {
    let mut token = uuid::Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

/// 分组导出器
///
/// 同一次运行内记录已用标识，避免两个输出文件重名。
pub struct Exporter<'a> {
    output_dir: PathBuf,
    codec: &'a dyn AudioCodec,
    used_tokens: HashSet<String>,
}

impl<'a> Exporter<'a> {
    pub fn new(output_dir: impl Into<PathBuf>, codec: &'a dyn AudioCodec) -> Self {
        Self {
            output_dir: output_dir.into(),
            codec,
            used_tokens: HashSet::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 导出一个分组
    ///
    /// 任一成员解码失败或编码/写入失败，整个分组失败；写入中途失败会删除半成品文件。
    pub fn export(&mut self, group: &Group) -> AudioResult<OutputArtifact> {
        let merged = self.merge_members(group)?;

        let format = group.format();
        let bytes = self.codec.encode(&merged, format)?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self.write_unique(&bytes, group.total_ms(), format)?;

        Ok(OutputArtifact {
            path,
            duration_ms: group.total_ms(),
            format,
            member_count: group.len(),
            sources: group
                .members()
                .iter()
                .map(|m| m.path().to_path_buf())
                .collect(),
        })
    }

    fn merge_members(&self, group: &Group) -> AudioResult<AudioBuffer> {
        let mut merged: Option<AudioBuffer> = None;

        for member in group.members() {
            let buffer = self.codec.decode(member.path()).map_err(|e| {
                AudioError::DecodingError(format!(
                    "重新解码 {} 失败: {e}",
                    member.file.file_name()
                ))
            })?;
            merged = Some(match merged {
                Some(head) => self.codec.concat(head, buffer)?,
                None => buffer,
            });
        }

        merged.ok_or_else(|| AudioError::InvalidInput("分组为空".to_string()))
    }

    fn write_unique(
        &mut self,
        bytes: &[u8],
        total_ms: u64,
        format: ContainerFormat,
    ) -> AudioResult<PathBuf> {
        loop {
            let token = generate_token();
            if self.used_tokens.contains(&token) {
                continue;
            }

            let path = self
                .output_dir
                .join(artifact_file_name(&token, total_ms, format));

            // create_new: 已存在同名文件时重新生成标识，绝不覆盖
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    self.used_tokens.insert(token);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            self.used_tokens.insert(token);
            if let Err(e) = file.write_all(bytes).and_then(|()| file.flush()) {
                drop(file);
                let _ = fs::remove_file(&path);
                return Err(e.into());
            }
            return Ok(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{AudioFileRef, AudioInfo};
    use crate::core::repacker::repack;
    use std::cell::RefCell;

    /// 假编解码器：文件名中的数字即时长（毫秒），8kHz单声道
    struct FakeCodec {
        encoded: RefCell<Vec<u64>>,
    }

    impl FakeCodec {
        fn new() -> Self {
            Self {
                encoded: RefCell::new(Vec::new()),
            }
        }
    }

    impl AudioCodec for FakeCodec {
        fn decode(&self, path: &Path) -> AudioResult<AudioBuffer> {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| AudioError::DecodingError("bad name".into()))?;
            let ms: u64 = stem
                .parse()
                .map_err(|e| AudioError::DecodingError(format!("{e}")))?;
            AudioBuffer::silent(8000, 1, ms)
        }

        fn encode(&self, buffer: &AudioBuffer, _format: ContainerFormat) -> AudioResult<Vec<u8>> {
            self.encoded.borrow_mut().push(buffer.duration_ms());
            Ok(vec![0u8; 16])
        }
    }

    fn info(ms: u64, format: ContainerFormat) -> AudioInfo {
        let name = format!("{ms}.{}", format.extension());
        AudioInfo::new(AudioFileRef::new(name, format), ms)
    }

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(
            artifact_file_name("3f9a1c2b", 15000, ContainerFormat::Wav),
            "merged_3f9a1c2b_15.0s.wav"
        );
        assert_eq!(
            artifact_file_name("00000000", 10049, ContainerFormat::Mp3),
            "merged_00000000_10.0s.mp3"
        );
    }

    #[test]
    fn test_token_is_short_hex() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_export_concatenates_members() {
        let dir = tempfile::tempdir().unwrap();
        let codec = FakeCodec::new();
        let groups = repack(
            vec![
                info(3000, ContainerFormat::Wav),
                info(5000, ContainerFormat::Wav),
                info(7000, ContainerFormat::Mp3),
            ],
            15000,
        )
        .unwrap();

        let out_dir = dir.path().join("out");
        let mut exporter = Exporter::new(&out_dir, &codec);
        let artifact = exporter.export(&groups[0]).unwrap();

        assert!(artifact.path.exists());
        assert_eq!(artifact.path.parent(), Some(out_dir.as_path()));
        assert_eq!(artifact.duration_ms, 15000);
        assert_eq!(artifact.member_count, 3);
        assert_eq!(artifact.format, ContainerFormat::Mp3);
        assert!(artifact.file_name().starts_with("merged_"));
        assert!(artifact.file_name().ends_with("_15.0s.mp3"));
        assert_eq!(*codec.encoded.borrow(), vec![15000]);
    }

    #[test]
    fn test_export_fails_when_member_cannot_decode() {
        let dir = tempfile::tempdir().unwrap();
        let codec = FakeCodec::new();
        let group = repack(
            vec![
                info(3000, ContainerFormat::Wav),
                AudioInfo::new(AudioFileRef::new("broken.wav", ContainerFormat::Wav), 1000),
            ],
            15000,
        )
        .unwrap()
        .remove(0);

        let mut exporter = Exporter::new(dir.path(), &codec);
        let result = exporter.export(&group);

        assert!(matches!(result, Err(AudioError::DecodingError(_))));
        assert!(codec.encoded.borrow().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_repeated_exports_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let codec = FakeCodec::new();
        let group = repack(vec![info(1000, ContainerFormat::Wav)], 500)
            .unwrap()
            .remove(0);

        let mut exporter = Exporter::new(dir.path(), &codec);
        let mut names = HashSet::new();
        for _ in 0..20 {
            names.insert(exporter.export(&group).unwrap().file_name());
        }
        assert_eq!(names.len(), 20);
    }
}
