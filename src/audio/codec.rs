//! 编解码适配层
//!
//! 核心流程只依赖 [`AudioCodec`] 这三个操作，便于替换实现或在测试中注入假实现。

use super::buffer::AudioBuffer;
use super::encoder::UniversalEncoder;
use super::format::ContainerFormat;
use super::universal_decoder::UniversalDecoder;
use crate::error::AudioResult;
use std::path::Path;

/// 编解码器接口
pub trait AudioCodec {
    /// 解码文件为内存缓冲区（时长由 [`AudioBuffer::duration_ms`] 给出）
    fn decode(&self, path: &Path) -> AudioResult<AudioBuffer>;

    /// 将缓冲区编码为指定容器格式的字节
    fn encode(&self, buffer: &AudioBuffer, format: ContainerFormat) -> AudioResult<Vec<u8>>;

    /// 拼接两段音频（head在前）
    fn concat(&self, head: AudioBuffer, tail: AudioBuffer) -> AudioResult<AudioBuffer> {
        Ok(head.append(tail))
    }
}

/// 默认编解码器：symphonia/hound 解码 + hound/FFmpeg 编码
#[derive(Debug, Default, Clone, Copy)]
pub struct UniversalCodec {
    decoder: UniversalDecoder,
    encoder: UniversalEncoder,
}

impl UniversalCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioCodec for UniversalCodec {
    fn decode(&self, path: &Path) -> AudioResult<AudioBuffer> {
        self.decoder.decode_full(path)
    }

    fn encode(&self, buffer: &AudioBuffer, format: ContainerFormat) -> AudioResult<Vec<u8>> {
        self.encoder.encode(buffer, format)
    }
}
