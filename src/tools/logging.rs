//! 日志初始化
//!
//! 终端始终输出；指定 `--log-file` 时同时追加写入文件。
//! 默认 Info 级别，`--verbose` 时为 Debug。

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::OpenOptions;
use std::path::Path;

/// 根据 verbose 标志选择日志级别
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn logger_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// 初始化日志系统
///
/// 日志文件无法打开时退回到仅终端输出，并在 stderr 给出警告。
pub fn init_logging(verbose: bool, log_file: Option<&Path>) {
    let level = level_for(verbose);
    let config = logger_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(e) => eprintln!(
                "[WARNING] 无法打开日志文件 / Could not open log file {}: {e}",
                path.display()
            ),
        }
    }

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("[WARNING] 日志系统已初始化 / Logger already initialized");
    }
}
