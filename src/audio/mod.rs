//! 音频编解码模块
//!
//! 提供多格式音频文件的完整解码、内存拼接与按容器格式编码。
//!
//! **使用 `UniversalCodec`** - 核心流程通过 [`AudioCodec`] trait 调用

mod buffer;
mod encoder;
mod format;

pub mod codec;
pub mod ffmpeg_bridge;
pub mod universal_decoder;

pub use buffer::{AudioBuffer, frames_to_ms};
pub use codec::{AudioCodec, UniversalCodec};
pub use encoder::{UniversalEncoder, WAV_BITS_PER_SAMPLE, encode_wav};
pub use ffmpeg_bridge::FFmpegEncoder;
pub use format::ContainerFormat;
pub use universal_decoder::UniversalDecoder;
