//! Audio Merge Tool - 主程序入口
//!
//! 纯流程控制器，负责协调各个工具模块完成拼接任务。

use audio_merge_tool::{
    audio::{ContainerFormat, FFmpegEncoder, UniversalCodec},
    core::{self, LogObserver, MergeReport},
    error::{AudioError, ErrorCategory},
    tools::{self, AppConfig, RunFailure},
};
use std::process;

/// 获取错误建议文本
fn get_error_suggestion(error: &AudioError) -> &'static str {
    match error {
        AudioError::InvalidInput(_) => {
            "检查命令行参数是否正确，使用 --help 查看完整用法 / Check if command-line arguments are correct, use --help to see full usage"
        }
        AudioError::DirectoryNotFound(_) => {
            "确认 --input-dir 指向一个已存在的目录 / Make sure --input-dir points to an existing directory"
        }
        _ => match ErrorCategory::from_audio_error(error) {
            ErrorCategory::Io => {
                "检查文件路径是否正确，目录是否可读写 / Check paths and read/write permissions"
            }
            ErrorCategory::Encoding => {
                "非WAV格式需要安装FFmpeg / Non-WAV output requires FFmpeg on PATH"
            }
            _ => "请检查输入文件和参数设置 / Please check input files and parameter settings",
        },
    }
}

/// 错误处理和建议
fn handle_error(failure: RunFailure) -> ! {
    let error = failure.error();
    log::error!("错误 / Error: {error}");
    eprintln!("[INFO] 建议 / Suggestion: {}", get_error_suggestion(error));
    process::exit(failure.exit_code());
}

/// 非WAV格式需要FFmpeg，提前提示
fn warn_if_ffmpeg_missing(report: &MergeReport) {
    let needs_ffmpeg = report
        .groups
        .iter()
        .any(|group| group.format != ContainerFormat::Wav);
    if needs_ffmpeg && !FFmpegEncoder::is_available() {
        log::warn!(
            "部分分组需要FFmpeg编码，但未找到FFmpeg / FFmpeg not found for non-WAV groups"
        );
    }
}

/// 应用程序主逻辑（便于测试和复用）
fn run(config: &AppConfig) -> Result<i32, RunFailure> {
    let merge_config = config.to_merge_config().map_err(RunFailure::Config)?;
    let codec = UniversalCodec::new();
    let mut observer = LogObserver;

    let report =
        core::run(&merge_config, &codec, &mut observer).map_err(RunFailure::Pipeline)?;

    if report.dry_run {
        warn_if_ffmpeg_missing(&report);
    }
    print!("{}", tools::format_summary(&report));

    if let Some(path) = &config.report_path {
        match tools::write_json_report(&report, path) {
            Ok(()) => log::info!("报告已保存 / Report saved: {}", path.display()),
            Err(e) => log::error!("报告保存失败 / Failed to save report: {e}"),
        }
    }

    Ok(tools::exit_code_for(&report))
}

fn main() {
    // 1. 解析命令行参数
    let config = tools::parse_args();

    // 2. 初始化日志
    tools::init_logging(config.verbose, config.log_file.as_deref());

    // 3. 显示启动信息
    tools::show_startup_info(&config);

    // 4. 执行主逻辑，统一处理错误
    match run(&config) {
        Ok(code) => process::exit(code),
        Err(failure) => handle_error(failure),
    }
}
