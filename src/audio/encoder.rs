//! 统一音频编码器
//!
//! WAV 直接用 hound 在内存中编码（16位PCM）；其余容器交给 [`FFmpegEncoder`]。

use super::buffer::AudioBuffer;
use super::ffmpeg_bridge::{FFmpegEncoder, f32_to_i16};
use super::format::ContainerFormat;
use crate::error::{self, AudioResult};
use std::io::Cursor;

/// 导出WAV时使用的位深度
pub const WAV_BITS_PER_SAMPLE: u16 = 16;

#[derive(Debug, Default, Clone, Copy)]
pub struct UniversalEncoder;

impl UniversalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// 将缓冲区编码为指定容器格式的字节
    pub fn encode(&self, buffer: &AudioBuffer, format: ContainerFormat) -> AudioResult<Vec<u8>> {
        if format.is_native() {
            encode_wav(buffer)
        } else {
            FFmpegEncoder::locate()?.encode(buffer, format)
        }
    }
}

/// WAV 头部（RIFF + fmt + data 块头）占用的字节数
const WAV_HEADER_BYTES: u64 = 44;

/// 检查样本数能否放进 WAV 的 32 位长度字段，返回 hound 需要的样本数
fn wav_sample_count(sample_count: usize) -> AudioResult<u32> {
    let bytes_per_sample = u64::from(WAV_BITS_PER_SAMPLE / 8);
    let data_bytes = (sample_count as u64).saturating_mul(bytes_per_sample);

    if data_bytes > u64::from(u32::MAX) - WAV_HEADER_BYTES {
        return Err(error::encoding_error(
            "合并结果超出WAV文件4GB上限",
            format!("{sample_count} 个样本"),
        ));
    }
    Ok(sample_count as u32)
}

/// 使用hound编码WAV
pub fn encode_wav(buffer: &AudioBuffer) -> AudioResult<Vec<u8>> {
    let sample_count = wav_sample_count(buffer.samples().len())?;
    let spec = hound::WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: WAV_BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| error::encoding_error("创建WAV写入器失败", e))?;
        let mut sample_writer = writer.get_i16_writer(sample_count);
        for &sample in buffer.samples() {
            sample_writer.write_sample(f32_to_i16(sample));
        }
        sample_writer
            .flush()
            .map_err(|e| error::encoding_error("写入WAV样本失败", e))?;
        writer
            .finalize()
            .map_err(|e| error::encoding_error("完成WAV写入失败", e))?;
    }

    Ok(cursor.into_inner())
}
