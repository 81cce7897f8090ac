//! 统一音频解码器
//!
//! 将磁盘上的音频文件完整解码为内存中的 [`AudioBuffer`]。
//! WAV 优先使用 hound（更快），失败时回退到 symphonia 通用解码。

use super::buffer::AudioBuffer;
use super::format::ContainerFormat;
use crate::error::{self, AudioError, AudioResult};
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// 统一解码器（无状态，可重复使用）
#[derive(Debug, Default, Clone, Copy)]
pub struct UniversalDecoder;

impl UniversalDecoder {
    pub fn new() -> Self {
        Self
    }

    /// 完整解码文件
    pub fn decode_full(&self, path: &Path) -> AudioResult<AudioBuffer> {
        if !path.is_file() {
            return Err(AudioError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("文件不存在: {}", path.display()),
            )));
        }

        if ContainerFormat::from_path(path) == Some(ContainerFormat::Wav) {
            match self.decode_with_hound(path) {
                Ok(buffer) => return Ok(buffer),
                Err(e) => {
                    log::warn!(
                        "hound解码失败，使用symphonia后备解码器 / hound failed, falling back to symphonia: {} ({e})",
                        path.display()
                    );
                }
            }
        }

        self.decode_with_symphonia(path)
    }

    /// 使用hound解码WAV文件
    fn decode_with_hound(&self, path: &Path) -> AudioResult<AudioBuffer> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => {
                if spec.bits_per_sample != 32 {
                    return Err(error::format_error(
                        "不支持的浮点位深度",
                        format!("{}位", spec.bits_per_sample),
                    ));
                }
                reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?
            }
            hound::SampleFormat::Int => {
                if !(1..=32).contains(&spec.bits_per_sample) {
                    return Err(error::format_error(
                        "不支持的位深度",
                        format!("{}位", spec.bits_per_sample),
                    ));
                }
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| (v as f64 / scale) as f32))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        AudioBuffer::new(spec.sample_rate, spec.channels, samples)
    }

    /// 使用symphonia通用解码
    fn decode_with_symphonia(&self, path: &Path) -> AudioResult<AudioBuffer> {
        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = path.extension() {
            hint.with_extension(&extension.to_string_lossy());
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| error::format_error("格式探测失败", e))?;

        let mut format_reader = probed.format;

        let track = format_reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::FormatError("未找到音频轨道".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| error::format_error("创建解码器失败", e))?;

        let mut sample_rate = codec_params.sample_rate;
        let mut channels = codec_params.channels.map(|ch| ch.count() as u16);
        let mut samples = Vec::new();

        loop {
            let packet = match format_reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(error::decoding_error("读取包失败", e)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(audio_buf) => {
                    let spec = *audio_buf.spec();
                    sample_rate.get_or_insert(spec.rate);
                    channels.get_or_insert(spec.channels.count() as u16);

                    if audio_buf.frames() == 0 {
                        continue;
                    }
                    let mut sample_buf =
                        SampleBuffer::<f32>::new(audio_buf.capacity() as u64, spec);
                    sample_buf.copy_interleaved_ref(audio_buf);
                    samples.extend_from_slice(sample_buf.samples());
                }
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                // 损坏的包直接跳过
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(e) => return Err(error::decoding_error("解码失败", e)),
            }
        }

        let sample_rate = sample_rate
            .ok_or_else(|| AudioError::FormatError("无法获取采样率信息".to_string()))?;
        let channels =
            channels.ok_or_else(|| AudioError::FormatError("无法获取声道数信息".to_string()))?;

        AudioBuffer::new(sample_rate, channels, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, sample_rate: u32, frames: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            writer.write_sample((i % 100) as i16 * 100).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decode_wav_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_wav(&path, 8000, 12_000);

        let buffer = UniversalDecoder::new().decode_full(&path).unwrap();
        assert_eq!(buffer.sample_rate(), 8000);
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.duration_ms(), 1500);
    }

    #[test]
    fn test_decode_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CLIP.WAV");
        write_wav(&path, 8000, 800);

        let buffer = UniversalDecoder::new().decode_full(&path).unwrap();
        assert_eq!(buffer.duration_ms(), 100);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        assert!(UniversalDecoder::new().decode_full(&path).is_err());
    }

    #[test]
    fn test_decode_missing_file_is_io_error() {
        let result = UniversalDecoder::new().decode_full(Path::new("/nonexistent/clip.wav"));
        assert!(matches!(result, Err(AudioError::IoError(_))));
    }
}
