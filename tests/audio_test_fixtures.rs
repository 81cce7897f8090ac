//! 音频测试固件生成器
//!
//! 在临时目录中生成精确时长的WAV片段，供扫描/索引/拼接流程测试使用

#![allow(dead_code)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 固件默认采样率：8kHz下每毫秒恰好8帧，时长无舍入误差
pub const FIXTURE_SAMPLE_RATE: u32 = 8000;

fn log(msg_zh: impl AsRef<str>, msg_en: impl AsRef<str>) {
    println!("{} / {}", msg_zh.as_ref(), msg_en.as_ref());
}

/// 测试工作区：输入目录 + 输出目录（随 TempDir 自动清理）
pub struct Workspace {
    root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("无法创建临时目录");
        fs::create_dir(root.path().join("input")).expect("无法创建输入目录");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.path().join("input")
    }

    /// 输出目录（不预先创建，由拼接流程负责创建）
    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("output")
    }

    /// 在输入目录中写入单声道片段
    pub fn add_clip(&self, name: &str, duration_ms: u64) -> PathBuf {
        let path = self.input_dir().join(name);
        write_wav_clip(&path, duration_ms, FIXTURE_SAMPLE_RATE, 1);
        path
    }

    /// 在输入目录中写入任意字节（用于损坏文件/非音频文件）
    pub fn add_raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.input_dir().join(name);
        fs::write(&path, bytes).expect("无法写入测试文件");
        path
    }

    /// 输出目录中的文件名（排序后）
    pub fn output_names(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.output_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

/// 生成精确时长的16位WAV（低幅度正弦波）
pub fn write_wav_clip(path: &Path, duration_ms: u64, sample_rate: u32, channels: u16) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let frames = duration_ms * sample_rate as u64 / 1000;

    let mut writer = WavWriter::create(path, spec).expect("无法创建WAV文件");
    for i in 0..frames {
        let t = i as f64 / sample_rate as f64;
        let value = ((2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.25 * i16::MAX as f64) as i16;
        for _ in 0..channels {
            writer.write_sample(value).expect("写入样本失败");
        }
    }
    writer.finalize().expect("无法完成WAV文件");

    log(
        format!("生成测试片段 {} ({duration_ms}ms)", path.display()),
        format!("fixture generated @ {sample_rate}Hz x{channels}"),
    );
}

/// 读取WAV文件时长（毫秒，四舍五入）
pub fn wav_duration_ms(path: &Path) -> u64 {
    let reader = hound::WavReader::open(path).expect("无法读取WAV文件");
    let spec = reader.spec();
    let frames = reader.duration() as u64;
    let rate = spec.sample_rate as u64;
    (frames * 1000 + rate / 2) / rate
}
