//! 文件扫描模块
//!
//! 列出输入目录的直接子项（不递归），按扩展名白名单过滤（大小写不敏感）。

use super::model::AudioFileRef;
use super::observer::{PipelineEvent, ProgressObserver};
use crate::error::{AudioError, AudioResult};
use std::path::Path;
use walkdir::WalkDir;

/// 扫描目录中的音频文件
///
/// 结果按文件名排序，保证同一目录多次扫描顺序一致。
pub fn scan_audio_files(
    dir_path: &Path,
    observer: &mut dyn ProgressObserver,
) -> AudioResult<Vec<AudioFileRef>> {
    if !dir_path.exists() {
        return Err(AudioError::DirectoryNotFound(dir_path.to_path_buf()));
    }

    if !dir_path.is_dir() {
        return Err(AudioError::InvalidInput(format!(
            "路径不是目录: {}",
            dir_path.display()
        )));
    }

    observer.on_event(&PipelineEvent::ScanStarted { dir: dir_path });

    let mut audio_files = Vec::new();

    // 只看直接子项，不进入子目录
    let walker = WalkDir::new(dir_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| AudioError::IoError(e.into()))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        match AudioFileRef::from_path(path) {
            Some(file) => {
                observer.on_event(&PipelineEvent::Discovered { file: &file });
                audio_files.push(file);
            }
            None => observer.on_event(&PipelineEvent::Skipped { path }),
        }
    }

    Ok(audio_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::ContainerFormat;
    use crate::core::observer::NullObserver;
    use std::fs;

    #[test]
    fn test_filters_by_extension_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.WAV", "a.mp3", "c.Flac", "notes.txt", "cover.jpg", "noext"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = scan_audio_files(dir.path(), &mut NullObserver).unwrap();
        let names: Vec<String> = files.iter().map(AudioFileRef::file_name).collect();
        assert_eq!(names, vec!["a.mp3", "b.WAV", "c.Flac"]);
        assert_eq!(files[1].format(), ContainerFormat::Wav);
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested.wav");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inner.wav"), b"x").unwrap();
        fs::write(dir.path().join("top.ogg"), b"x").unwrap();

        let files = scan_audio_files(dir.path(), &mut NullObserver).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name(), "top.ogg");
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let result = scan_audio_files(&missing, &mut NullObserver);
        assert!(matches!(result, Err(AudioError::DirectoryNotFound(p)) if p == missing));
    }

    #[test]
    fn test_file_instead_of_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.wav");
        fs::write(&file, b"x").unwrap();

        let result = scan_audio_files(&file, &mut NullObserver);
        assert!(matches!(result, Err(AudioError::InvalidInput(_))));
    }

    #[test]
    fn test_skipped_files_reported_to_observer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), b"x").unwrap();
        fs::write(dir.path().join("a.aac"), b"x").unwrap();

        let mut skipped = Vec::new();
        let mut observer = crate::core::observer::from_fn(|event| {
            if let PipelineEvent::Skipped { path } = event {
                skipped.push(path.to_path_buf());
            }
        });
        let files = scan_audio_files(dir.path(), &mut observer).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(skipped, vec![dir.path().join("readme.md")]);
    }
}
