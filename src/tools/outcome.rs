//! 运行结果 → 进程退出码
//!
//! 参数错误在进入流程之前发现，退出码为2；流程本身的错误（输入目录不存在、
//! 输入路径不是目录）以及未生成任何文件，退出码都是1。

use super::constants::exit_codes;
use crate::core::MergeReport;
use crate::error::AudioError;
use std::fmt;

/// 运行失败的阶段
#[derive(Debug)]
pub enum RunFailure {
    /// 参数无法转换为有效配置
    Config(AudioError),
    /// 拼接流程返回的错误
    Pipeline(AudioError),
}

impl RunFailure {
    pub fn error(&self) -> &AudioError {
        match self {
            RunFailure::Config(e) | RunFailure::Pipeline(e) => e,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RunFailure::Config(_) => exit_codes::USAGE_ERROR,
            RunFailure::Pipeline(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.error(), f)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error())
    }
}

/// 成功运行的退出码：至少生成一个文件（预演模式下至少一个分组）为0，否则为1
pub fn exit_code_for(report: &MergeReport) -> i32 {
    let produced = if report.dry_run {
        report.group_count()
    } else {
        report.artifact_count()
    };
    if produced > 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::GENERAL_ERROR
    }
}
