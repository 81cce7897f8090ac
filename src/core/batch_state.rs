//! 批处理状态管理模块
//!
//! 按阶段累计成功/失败计数与诊断信息。单个文件或分组失败只记录，不中断流程。

use crate::error::{AudioError, ErrorCategory};
use std::collections::BTreeMap;

/// 流程阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// 时长索引（解码）
    Index,
    /// 分组导出（拼接/编码/写出）
    Export,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Index => "时长分析 / Indexing",
            Stage::Export => "导出 / Export",
        }
    }
}

/// 单条失败诊断
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    /// 失败对象（文件名或分组标识）
    pub subject: String,
    pub category: ErrorCategory,
    pub message: String,
}

/// 批处理统计快照
#[derive(Debug, Clone, serde::Serialize)]
pub struct BatchStatsSnapshot {
    /// 所属阶段
    pub stage: Stage,
    /// 成功处理数
    pub processed: usize,
    /// 失败数
    pub failed: usize,
    /// 错误分类统计（错误类型 -> 失败对象列表）
    pub error_stats: BTreeMap<ErrorCategory, Vec<String>>,
    /// 按发生顺序的诊断列表
    pub diagnostics: Vec<Diagnostic>,
}

/// 串行批处理统计
#[derive(Debug)]
pub struct SerialBatchStats {
    stage: Stage,
    processed: usize,
    diagnostics: Vec<Diagnostic>,
    error_stats: BTreeMap<ErrorCategory, Vec<String>>,
}

impl SerialBatchStats {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            processed: 0,
            diagnostics: Vec::new(),
            error_stats: BTreeMap::new(),
        }
    }

    /// 增加成功处理计数
    #[inline]
    pub fn inc_processed(&mut self) -> usize {
        self.processed += 1;
        self.processed
    }

    /// 记录一次失败，返回累计失败数
    pub fn record_failure(&mut self, subject: impl Into<String>, error: &AudioError) -> usize {
        let subject = subject.into();
        let category = ErrorCategory::from_audio_error(error);

        self.error_stats
            .entry(category)
            .or_default()
            .push(subject.clone());
        self.diagnostics.push(Diagnostic {
            stage: self.stage,
            subject,
            category,
            message: error.to_string(),
        });
        self.diagnostics.len()
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn failed(&self) -> usize {
        self.diagnostics.len()
    }

    /// 获取统计快照
    pub fn snapshot(&self) -> BatchStatsSnapshot {
        BatchStatsSnapshot {
            stage: self.stage,
            processed: self.processed,
            failed: self.failed(),
            error_stats: self.error_stats.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}
