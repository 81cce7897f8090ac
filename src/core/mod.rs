//! 核心流程模块
//!
//! 包含扫描、时长索引、贪心重组与导出的数据结构和算法实现。

pub mod batch_state;
pub mod exporter;
pub mod indexer;
pub mod model;
pub mod observer;
pub mod pipeline;
pub mod repacker;
pub mod scanner;

// 重新导出公共接口
pub use batch_state::{BatchStatsSnapshot, Diagnostic, SerialBatchStats, Stage};
pub use exporter::{Exporter, OutputArtifact, artifact_file_name};
pub use indexer::index_durations;
pub use model::{AudioFileRef, AudioInfo, format_seconds_1dp, sort_by_duration};
pub use observer::{
    FnObserver, LogObserver, NullObserver, PipelineEvent, ProgressObserver, from_fn,
};
pub use pipeline::{GroupSummary, MergeConfig, MergeReport, run, seconds_to_ms};
pub use repacker::{FlushReason, GreedyRepacker, Group, repack};
pub use scanner::scan_audio_files;
