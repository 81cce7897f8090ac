//! 进度观察者
//!
//! 核心流程不持有任何全局状态，所有进度通过注入的 [`ProgressObserver`] 上报。
//! 闭包可通过 [`from_fn`] 包装为观察者。

use super::exporter::OutputArtifact;
use super::model::{AudioFileRef, AudioInfo, format_seconds_1dp};
use super::repacker::{FlushReason, Group};
use crate::error::AudioError;
use std::path::Path;

/// 流程事件
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// 开始扫描输入目录
    ScanStarted { dir: &'a Path },
    /// 找到受支持的音频文件
    Discovered { file: &'a AudioFileRef },
    /// 跳过不支持的文件
    Skipped { path: &'a Path },
    /// 完成单个文件的时长分析
    Indexed { info: &'a AudioInfo },
    /// 单个文件解码失败（已排除）
    DecodeFailed { path: &'a Path, error: &'a AudioError },
    /// 索引完成，列表已按时长排序
    Sorted { infos: &'a [AudioInfo] },
    /// 分组已输出（序号从1开始）
    GroupFlushed { index: usize, group: &'a Group },
    /// 分组导出成功
    Exported { index: usize, artifact: &'a OutputArtifact },
    /// 分组导出失败（继续处理后续分组）
    ExportFailed { index: usize, error: &'a AudioError },
    /// 流程结束
    Finished { artifacts: usize },
}

/// 观察者接口
pub trait ProgressObserver {
    fn on_event(&mut self, event: &PipelineEvent<'_>);
}

/// 闭包观察者，见 [`from_fn`]
#[derive(Debug, Clone, Copy)]
pub struct FnObserver<F>(F);

/// 将闭包包装为观察者
pub fn from_fn<F>(f: F) -> FnObserver<F>
where
    F: FnMut(&PipelineEvent<'_>),
{
    FnObserver(f)
}

impl<F> ProgressObserver for FnObserver<F>
where
    F: FnMut(&PipelineEvent<'_>),
{
    fn on_event(&mut self, event: &PipelineEvent<'_>) {
        (self.0)(event)
    }
}

/// 忽略所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_event(&mut self, _event: &PipelineEvent<'_>) {}
}

/// 将事件转发到 `log` 门面
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_event(&mut self, event: &PipelineEvent<'_>) {
        match event {
            PipelineEvent::ScanStarted { dir } => {
                log::info!("扫描目录 / Scanning: {}", dir.display());
            }
            PipelineEvent::Discovered { file } => {
                log::info!("找到音频文件 / Found: {}", file.file_name());
            }
            PipelineEvent::Skipped { path } => {
                log::info!("跳过不支持的文件 / Skipped: {}", path.display());
            }
            PipelineEvent::Indexed { info } => {
                log::info!(
                    "音频 {} 时长 / duration: {:.2}秒",
                    info.file.file_name(),
                    info.duration_ms as f64 / 1000.0
                );
            }
            PipelineEvent::DecodeFailed { path, error } => {
                log::error!("处理音频 {} 时出错 / decode failed: {error}", path.display());
            }
            PipelineEvent::Sorted { infos } => {
                log::info!("音频文件按时长排序 / Sorted by duration:");
                for info in infos.iter() {
                    log::debug!(
                        "  - {}: {:.2}秒",
                        info.file.file_name(),
                        info.duration_ms as f64 / 1000.0
                    );
                }
            }
            PipelineEvent::GroupFlushed { index, group } => {
                let names: Vec<String> = group
                    .members()
                    .iter()
                    .map(|m| m.file.file_name())
                    .collect();
                let reason = match group.reason() {
                    FlushReason::Threshold => "达到阈值 / threshold reached",
                    FlushReason::Remainder => "剩余音频段 / remainder",
                };
                log::info!(
                    "分组 #{index} ({reason}): {} 个文件, {}秒",
                    group.len(),
                    format_seconds_1dp(group.total_ms())
                );
                log::debug!("分组 #{index} 包含的文件: {}", names.join(", "));
            }
            PipelineEvent::Exported { index, artifact } => {
                log::info!(
                    "成功生成音频 / Exported #{index}: {} ({}秒)",
                    artifact.file_name(),
                    format_seconds_1dp(artifact.duration_ms)
                );
            }
            PipelineEvent::ExportFailed { index, error } => {
                log::error!("分组 #{index} 导出失败 / export failed: {error}");
            }
            PipelineEvent::Finished { artifacts } => {
                if *artifacts > 0 {
                    log::info!("处理完成: 成功生成 {artifacts} 个音频文件");
                } else {
                    log::warn!("未生成任何合并文件 / No merged files were produced");
                }
            }
        }
    }
}
