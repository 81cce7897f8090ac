//! 时长索引
//!
//! 逐个完整解码扫描到的文件，只保留实测时长；解码失败的文件记录诊断后排除。
//! 解码得到的样本数据在测出时长后立即释放，导出阶段再重新解码。

use super::batch_state::SerialBatchStats;
use super::model::{AudioFileRef, AudioInfo, sort_by_duration};
use super::observer::{PipelineEvent, ProgressObserver};
use crate::audio::AudioCodec;

/// 测量所有文件的时长并按时长升序排序
pub fn index_durations(
    files: &[AudioFileRef],
    codec: &dyn AudioCodec,
    observer: &mut dyn ProgressObserver,
    stats: &mut SerialBatchStats,
) -> Vec<AudioInfo> {
    let mut infos = Vec::with_capacity(files.len());

    for file in files {
        match codec.decode(file.path()) {
            Ok(buffer) => {
                let info = AudioInfo::new(file.clone(), buffer.duration_ms());
                drop(buffer);

                observer.on_event(&PipelineEvent::Indexed { info: &info });
                stats.inc_processed();
                infos.push(info);
            }
            Err(error) => {
                observer.on_event(&PipelineEvent::DecodeFailed {
                    path: file.path(),
                    error: &error,
                });
                stats.record_failure(file.file_name(), &error);
            }
        }
    }

    sort_by_duration(&mut infos);
    observer.on_event(&PipelineEvent::Sorted { infos: &infos });
    infos
}
