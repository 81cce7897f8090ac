//! Audio Merge Tool
//!
//! 将目录中的短音频片段按时长升序贪心拼接为不短于指定阈值的合并文件。
//!
//! ## 核心流程
//! - 扫描：列出输入目录中受支持扩展名的文件（不递归）
//! - 时长索引：完整解码测出实际时长，按时长升序排序
//! - 贪心重组：累计时长达到阈值即输出分组，剩余部分作为最后一组
//! - 导出：拼接分组成员，按最后一个成员的格式编码写出

pub mod audio;
pub mod core;
pub mod error;
pub mod tools;

// 重新导出核心类型
pub use audio::{AudioBuffer, AudioCodec, ContainerFormat, UniversalCodec};
pub use core::{GreedyRepacker, Group, MergeConfig, MergeReport, OutputArtifact};
pub use error::{AudioError, AudioResult};
