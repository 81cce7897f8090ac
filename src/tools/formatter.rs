//! 输出格式化模块
//!
//! 负责运行结束后的汇总表格、预演模式的分组计划和 JSON 报告。

use super::utils;
use crate::core::{BatchStatsSnapshot, FlushReason, MergeReport, format_seconds_1dp};
use crate::error::{self, AudioResult};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use std::fs;
use std::path::Path;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn reason_label(reason: FlushReason) -> &'static str {
    match reason {
        FlushReason::Threshold => "阈值 / threshold",
        FlushReason::Remainder => "剩余 / remainder",
    }
}

/// 分组计划表格（预演模式）
pub fn format_group_plan(report: &MergeReport) -> String {
    let mut table = new_table(vec![
        "# / 序号",
        "Files / 文件",
        "Duration / 时长",
        "Format / 格式",
        "Reason / 原因",
    ]);

    for group in &report.groups {
        let names: Vec<String> = group
            .members
            .iter()
            .map(|m| m.file.file_name())
            .collect();
        table.add_row(vec![
            Cell::new(group.index).set_alignment(CellAlignment::Right),
            Cell::new(names.join("\n")),
            Cell::new(format!("{}s", format_seconds_1dp(group.total_ms)))
                .set_alignment(CellAlignment::Right),
            Cell::new(group.format),
            Cell::new(reason_label(group.reason)),
        ]);
    }

    table.to_string()
}

/// 已生成文件表格
pub fn format_artifact_table(report: &MergeReport) -> String {
    let mut table = new_table(vec![
        "File / 文件",
        "Duration / 时长",
        "Clips / 片段数",
        "Format / 格式",
    ]);

    for artifact in &report.artifacts {
        table.add_row(vec![
            Cell::new(artifact.file_name()),
            Cell::new(utils::format_clock(artifact.duration_ms))
                .set_alignment(CellAlignment::Right),
            Cell::new(artifact.member_count).set_alignment(CellAlignment::Right),
            Cell::new(artifact.format),
        ]);
    }

    table.to_string()
}

fn format_failures(stats: &BatchStatsSnapshot) -> String {
    let mut output = String::new();
    if stats.failed == 0 {
        return output;
    }

    output.push_str(&format!(
        "{}: {} 个失败\n",
        stats.stage.display_name(),
        stats.failed
    ));
    for (category, subjects) in &stats.error_stats {
        output.push_str(&format!(
            "   - {}: {}\n",
            category.display_name(),
            subjects.join(", ")
        ));
    }
    output
}

/// 运行汇总文本
pub fn format_summary(report: &MergeReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "找到 {} 个音频文件，成功分析 {} 个，生成 {} 个分组\n",
        report.discovered,
        report.indexed,
        report.group_count()
    ));
    output.push_str(&format_failures(&report.index_stats));

    if report.dry_run {
        if !report.groups.is_empty() {
            output.push_str(&format_group_plan(report));
            output.push('\n');
        }
        return output;
    }

    if !report.artifacts.is_empty() {
        output.push_str(&format_artifact_table(report));
        output.push('\n');
    }
    output.push_str(&format_failures(&report.export_stats));
    output.push_str(&format!(
        "处理完成: 成功生成 {} 个音频文件\n",
        report.artifact_count()
    ));
    output
}

/// JSON 报告
#[derive(Debug, serde::Serialize)]
struct JsonReport<'a> {
    tool_version: &'static str,
    generated_at: chrono::DateTime<chrono::Local>,
    #[serde(flatten)]
    report: &'a MergeReport,
}

/// 将运行报告序列化为 JSON 字符串
pub fn report_to_json(report: &MergeReport) -> AudioResult<String> {
    let json = JsonReport {
        tool_version: VERSION,
        generated_at: chrono::Local::now(),
        report,
    };
    serde_json::to_string_pretty(&json)
        .map_err(|e| error::encoding_error("报告序列化失败", e))
}

/// 写出 JSON 报告（自动创建父目录）
pub fn write_json_report(report: &MergeReport, path: &Path) -> AudioResult<()> {
    let json = report_to_json(report)?;
    let parent = utils::get_parent_dir(path);
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
