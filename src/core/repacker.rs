//! 贪心重组算法
//!
//! 输入按时长升序排列的音频列表，逐个累加到当前分组，
//! 累计时长 ≥ 阈值时立即输出该分组并开始新分组；
//! 遍历结束后剩余的分组无论长短都作为最后一组输出（不丢弃、不向前合并）。
//!
//! 分组生命周期：打开（第一个成员）→ 累加 → 输出（终态）。
//! 打开中的分组是私有的 [`OpenGroup`]，输出时按值转换为不可变的 [`Group`]，
//! 因此空分组不可能被输出，也不可能输出两次。

use super::model::AudioInfo;
use crate::audio::ContainerFormat;
use crate::error::{AudioError, AudioResult};

/// 分组输出原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushReason {
    /// 累计时长达到阈值
    Threshold,
    /// 遍历结束时的剩余分组（可能短于阈值）
    Remainder,
}

/// 已输出的分组（不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<AudioInfo>,
    total_ms: u64,
    reason: FlushReason,
}

impl Group {
    /// 成员（按累加顺序，即时长升序）
    pub fn members(&self) -> &[AudioInfo] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// 总是 `false`：空分组不会被输出
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// 成员时长之和（毫秒）
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn reason(&self) -> FlushReason {
        self.reason
    }

    /// 输出前最后加入的成员
    pub fn trigger(&self) -> &AudioInfo {
        &self.members[self.members.len() - 1]
    }

    /// 导出使用的容器格式：继承最后加入成员的格式
    pub fn format(&self) -> ContainerFormat {
        self.trigger().format()
    }

    pub fn into_members(self) -> Vec<AudioInfo> {
        self.members
    }
}

/// 正在累加的分组
#[derive(Debug)]
struct OpenGroup {
    members: Vec<AudioInfo>,
    total_ms: u64,
}

impl OpenGroup {
    fn open(first: AudioInfo) -> Self {
        let total_ms = first.duration_ms;
        Self {
            members: vec![first],
            total_ms,
        }
    }

    fn append(&mut self, info: AudioInfo) {
        self.total_ms = self.total_ms.saturating_add(info.duration_ms);
        self.members.push(info);
    }

    fn flush(self, reason: FlushReason) -> Group {
        Group {
            members: self.members,
            total_ms: self.total_ms,
            reason,
        }
    }
}

/// 增量式贪心重组器
///
/// ```
/// use audio_merge_tool::audio::ContainerFormat;
/// use audio_merge_tool::core::{AudioFileRef, AudioInfo, GreedyRepacker};
///
/// let mut repacker = GreedyRepacker::new(15_000).unwrap();
/// let clip = |name: &str, ms| AudioInfo::new(AudioFileRef::new(name, ContainerFormat::Wav), ms);
///
/// assert!(repacker.push(clip("a.wav", 3_000)).is_none());
/// assert!(repacker.push(clip("b.wav", 5_000)).is_none());
/// let full = repacker.push(clip("c.wav", 7_000)).unwrap();
/// assert_eq!(full.total_ms(), 15_000);
///
/// assert!(repacker.push(clip("d.wav", 10_000)).is_none());
/// let tail = repacker.finish().unwrap();
/// assert_eq!(tail.total_ms(), 10_000);
/// ```
#[derive(Debug)]
pub struct GreedyRepacker {
    threshold_ms: u64,
    current: Option<OpenGroup>,
}

impl GreedyRepacker {
    /// 创建重组器，阈值必须为正
    pub fn new(threshold_ms: u64) -> AudioResult<Self> {
        if threshold_ms == 0 {
            return Err(AudioError::InvalidInput(
                "最小时长阈值必须大于0毫秒".to_string(),
            ));
        }
        Ok(Self {
            threshold_ms,
            current: None,
        })
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    /// 当前未输出分组的累计时长
    pub fn pending_ms(&self) -> u64 {
        self.current.as_ref().map_or(0, |group| group.total_ms)
    }

    /// 加入一个音频；达到阈值时返回输出的分组
    pub fn push(&mut self, info: AudioInfo) -> Option<Group> {
        match self.current.as_mut() {
            Some(group) => group.append(info),
            None => self.current = Some(OpenGroup::open(info)),
        }

        if self.pending_ms() >= self.threshold_ms {
            self.current
                .take()
                .map(|group| group.flush(FlushReason::Threshold))
        } else {
            None
        }
    }

    /// 结束遍历，无条件输出剩余分组
    pub fn finish(self) -> Option<Group> {
        self.current
            .map(|group| group.flush(FlushReason::Remainder))
    }
}

/// 对已排序的输入一次性生成完整分组计划
pub fn repack<I>(sorted: I, threshold_ms: u64) -> AudioResult<Vec<Group>>
where
    I: IntoIterator<Item = AudioInfo>,
{
    let mut repacker = GreedyRepacker::new(threshold_ms)?;
    let mut groups: Vec<Group> = sorted
        .into_iter()
        .filter_map(|info| repacker.push(info))
        .collect();
    groups.extend(repacker.finish());
    Ok(groups)
}
