//! 内存音频缓冲区
//!
//! 统一使用交错排列的 f32 样本（[L1, R1, L2, R2, ...]），
//! 提供时长计算与拼接（含采样率/声道数对齐）。

use crate::error::{AudioError, AudioResult};

/// 解码后的音频数据
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: u16,
    samples: Vec<f32>,
}

impl AudioBuffer {
    /// 创建新的音频缓冲区
    ///
    /// 样本数必须是声道数的整数倍。
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<f32>) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::FormatError("采样率不能为0".to_string()));
        }
        if channels == 0 {
            return Err(AudioError::FormatError("声道数不能为0".to_string()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(AudioError::FormatError(format!(
                "样本数({})不是声道数({channels})的整数倍",
                samples.len()
            )));
        }

        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// 创建指定时长的静音缓冲区
    pub fn silent(sample_rate: u32, channels: u16, duration_ms: u64) -> AudioResult<Self> {
        let frames = (duration_ms as u128 * sample_rate as u128 / 1000) as usize;
        Self::new(sample_rate, channels, vec![0.0; frames * channels as usize])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// 交错样本
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// 每声道帧数
    pub fn frames(&self) -> u64 {
        (self.samples.len() / self.channels as usize) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 时长（毫秒，四舍五入）
    pub fn duration_ms(&self) -> u64 {
        frames_to_ms(self.frames(), self.sample_rate)
    }

    /// 在末尾拼接另一段音频
    ///
    /// 两段规格不同时统一到较高的采样率和较多的声道数。
    pub fn append(self, tail: AudioBuffer) -> AudioBuffer {
        let sample_rate = self.sample_rate.max(tail.sample_rate);
        let channels = self.channels.max(tail.channels);

        let mut head = self.converted(sample_rate, channels);
        let tail = tail.converted(sample_rate, channels);
        head.samples.extend_from_slice(&tail.samples);
        head
    }

    /// 转换到目标采样率与声道数
    pub fn converted(self, sample_rate: u32, channels: u16) -> AudioBuffer {
        let remixed = if self.channels == channels {
            self
        } else {
            self.remix(channels)
        };

        if remixed.sample_rate == sample_rate {
            remixed
        } else {
            remixed.resample(sample_rate)
        }
    }

    fn remix(self, channels: u16) -> AudioBuffer {
        let src_channels = self.channels as usize;
        let dst_channels = channels as usize;
        let mut samples = Vec::with_capacity(self.frames() as usize * dst_channels);

        for frame in self.samples.chunks_exact(src_channels) {
            if dst_channels == 1 {
                let sum: f32 = frame.iter().sum();
                samples.push(sum / src_channels as f32);
            } else {
                for ch in 0..dst_channels {
                    samples.push(frame[ch % src_channels]);
                }
            }
        }

        AudioBuffer {
            sample_rate: self.sample_rate,
            channels,
            samples,
        }
    }

    // 线性插值重采样
    fn resample(self, sample_rate: u32) -> AudioBuffer {
        let channels = self.channels as usize;
        let src_frames = self.frames() as usize;
        let dst_frames =
            (src_frames as u128 * sample_rate as u128 / self.sample_rate as u128) as usize;
        let step = self.sample_rate as f64 / sample_rate as f64;

        let mut samples = Vec::with_capacity(dst_frames * channels);
        for i in 0..dst_frames {
            let pos = i as f64 * step;
            let left = (pos.floor() as usize).min(src_frames.saturating_sub(1));
            let right = (left + 1).min(src_frames.saturating_sub(1));
            let frac = (pos - left as f64) as f32;

            for ch in 0..channels {
                let a = self.samples[left * channels + ch];
                let b = self.samples[right * channels + ch];
                samples.push(a + (b - a) * frac);
            }
        }

        AudioBuffer {
            sample_rate,
            channels: self.channels,
            samples,
        }
    }
}

/// 帧数 → 毫秒（四舍五入）
#[inline]
pub fn frames_to_ms(frames: u64, sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    let rate = sample_rate as u128;
    ((frames as u128 * 1000 + rate / 2) / rate) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_rounding() {
        assert_eq!(frames_to_ms(44100, 44100), 1000);
        assert_eq!(frames_to_ms(441, 44100), 10);
        // 1帧@44.1kHz ≈ 0.0227ms → 0
        assert_eq!(frames_to_ms(1, 44100), 0);
        // 2帧@3kHz ≈ 0.667ms → 1
        assert_eq!(frames_to_ms(2, 3000), 1);
        assert_eq!(frames_to_ms(10, 0), 0);
    }

    #[test]
    fn test_new_rejects_misaligned_samples() {
        assert!(AudioBuffer::new(8000, 2, vec![0.0; 3]).is_err());
        assert!(AudioBuffer::new(0, 1, vec![]).is_err());
        assert!(AudioBuffer::new(8000, 0, vec![]).is_err());
    }

    #[test]
    fn test_append_same_spec_keeps_order() {
        let head = AudioBuffer::new(1000, 1, vec![0.1, 0.2]).unwrap();
        let tail = AudioBuffer::new(1000, 1, vec![0.3]).unwrap();

        let merged = head.append(tail);
        assert_eq!(merged.samples(), &[0.1, 0.2, 0.3]);
        assert_eq!(merged.duration_ms(), 3);
    }

    #[test]
    fn test_append_upmixes_mono() {
        let head = AudioBuffer::new(1000, 2, vec![0.1, 0.2]).unwrap();
        let tail = AudioBuffer::new(1000, 1, vec![0.5]).unwrap();

        let merged = head.append(tail);
        assert_eq!(merged.channels(), 2);
        assert_eq!(merged.samples(), &[0.1, 0.2, 0.5, 0.5]);
    }

    #[test]
    fn test_append_resamples_to_higher_rate() {
        let head = AudioBuffer::silent(8000, 1, 1000).unwrap();
        let tail = AudioBuffer::silent(16000, 1, 500).unwrap();

        let merged = head.append(tail);
        assert_eq!(merged.sample_rate(), 16000);
        assert_eq!(merged.duration_ms(), 1500);
    }

    #[test]
    fn test_downmix_to_mono_averages() {
        let stereo = AudioBuffer::new(1000, 2, vec![0.2, 0.4]).unwrap();
        let mono = stereo.converted(1000, 1);
        assert_eq!(mono.channels(), 1);
        assert!((mono.samples()[0] - 0.3).abs() < 1e-6);
    }
}
