//! 拼接流程编排
//!
//! 扫描 → 时长索引（排序）→ 贪心重组 → 逐组导出，严格串行。
//! 分组在输出的同时立即导出，导出完成后该组的音频数据即被释放。

use super::batch_state::{BatchStatsSnapshot, SerialBatchStats, Stage};
use super::exporter::{Exporter, OutputArtifact};
use super::indexer::index_durations;
use super::model::AudioInfo;
use super::observer::{PipelineEvent, ProgressObserver};
use super::repacker::{FlushReason, GreedyRepacker, Group};
use super::scanner::scan_audio_files;
use crate::audio::{AudioCodec, ContainerFormat};
use crate::error::{AudioError, AudioResult};
use std::fs;
use std::path::{Path, PathBuf};

/// 一次拼接任务的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    input_dir: PathBuf,
    output_dir: PathBuf,
    min_duration_ms: u64,
    dry_run: bool,
}

impl MergeConfig {
    /// 创建配置，阈值必须至少1毫秒
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        min_duration_ms: u64,
    ) -> AudioResult<Self> {
        if min_duration_ms == 0 {
            return Err(AudioError::InvalidInput(
                "最小时长阈值必须大于0毫秒".to_string(),
            ));
        }
        Ok(Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            min_duration_ms,
            dry_run: false,
        })
    }

    /// 以秒为单位的阈值创建配置（四舍五入到毫秒）
    pub fn from_seconds(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        min_duration_secs: f64,
    ) -> AudioResult<Self> {
        Self::new(input_dir, output_dir, seconds_to_ms(min_duration_secs)?)
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn min_duration_ms(&self) -> u64 {
        self.min_duration_ms
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// 秒 → 毫秒（必须是有限正数，且四舍五入后至少1毫秒）
pub fn seconds_to_ms(seconds: f64) -> AudioResult<u64> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(AudioError::InvalidInput(format!(
            "最小时长必须是正数，当前值: {seconds}"
        )));
    }

    let ms = (seconds * 1000.0).round();
    if ms < 1.0 {
        return Err(AudioError::InvalidInput(format!(
            "最小时长过小（至少0.001秒），当前值: {seconds}"
        )));
    }
    if ms >= u64::MAX as f64 {
        return Err(AudioError::InvalidInput(format!(
            "最小时长过大，当前值: {seconds}"
        )));
    }
    Ok(ms as u64)
}

/// 分组摘要（报告用）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GroupSummary {
    /// 序号（从1开始）
    pub index: usize,
    pub total_ms: u64,
    pub format: ContainerFormat,
    pub reason: FlushReason,
    pub members: Vec<AudioInfo>,
}

impl GroupSummary {
    fn from_group(index: usize, group: &Group) -> Self {
        Self {
            index,
            total_ms: group.total_ms(),
            format: group.format(),
            reason: group.reason(),
            members: group.members().to_vec(),
        }
    }
}

/// 运行结果
#[derive(Debug, Clone, serde::Serialize)]
pub struct MergeReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub min_duration_ms: u64,
    pub dry_run: bool,
    /// 扫描到的受支持文件数
    pub discovered: usize,
    /// 成功测出时长的文件数
    pub indexed: usize,
    pub groups: Vec<GroupSummary>,
    pub artifacts: Vec<OutputArtifact>,
    pub index_stats: BatchStatsSnapshot,
    pub export_stats: BatchStatsSnapshot,
}

impl MergeReport {
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// 所有阶段的失败总数
    pub fn failure_count(&self) -> usize {
        self.index_stats.failed + self.export_stats.failed
    }
}

/// 执行一次完整的拼接流程
///
/// 只有输入目录不存在或不是目录时返回 `Err`；单个文件解码失败、
/// 单个分组导出失败都记录在报告中，不影响其他文件和分组。
pub fn run(
    config: &MergeConfig,
    codec: &dyn AudioCodec,
    observer: &mut dyn ProgressObserver,
) -> AudioResult<MergeReport> {
    let files = scan_audio_files(config.input_dir(), observer)?;

    // 输出目录提前创建（预演模式除外）；失败时由各分组导出时分别记录
    if !config.is_dry_run() {
        let _ = fs::create_dir_all(config.output_dir());
    }

    let mut index_stats = SerialBatchStats::new(Stage::Index);
    let infos = index_durations(&files, codec, observer, &mut index_stats);

    let mut report = MergeReport {
        input_dir: config.input_dir().to_path_buf(),
        output_dir: config.output_dir().to_path_buf(),
        min_duration_ms: config.min_duration_ms(),
        dry_run: config.is_dry_run(),
        discovered: files.len(),
        indexed: infos.len(),
        groups: Vec::new(),
        artifacts: Vec::new(),
        index_stats: index_stats.snapshot(),
        export_stats: SerialBatchStats::new(Stage::Export).snapshot(),
    };

    let mut repacker = GreedyRepacker::new(config.min_duration_ms())?;
    let mut exporter = Exporter::new(config.output_dir(), codec);
    let mut export_stats = SerialBatchStats::new(Stage::Export);

    let mut handle_group = |group: Group, report: &mut MergeReport| {
        let index = report.groups.len() + 1;
        observer.on_event(&PipelineEvent::GroupFlushed {
            index,
            group: &group,
        });
        report.groups.push(GroupSummary::from_group(index, &group));

        if config.is_dry_run() {
            return;
        }

        match exporter.export(&group) {
            Ok(artifact) => {
                observer.on_event(&PipelineEvent::Exported {
                    index,
                    artifact: &artifact,
                });
                export_stats.inc_processed();
                report.artifacts.push(artifact);
            }
            Err(error) => {
                observer.on_event(&PipelineEvent::ExportFailed {
                    index,
                    error: &error,
                });
                export_stats.record_failure(format!("group #{index}"), &error);
            }
        }
    };

    for info in infos {
        if let Some(group) = repacker.push(info) {
            handle_group(group, &mut report);
        }
    }
    if let Some(group) = repacker.finish() {
        handle_group(group, &mut report);
    }

    report.export_stats = export_stats.snapshot();
    observer.on_event(&PipelineEvent::Finished {
        artifacts: report.artifact_count(),
    });

    Ok(report)
}
