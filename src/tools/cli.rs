//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use super::constants::{SUPPORTED_EXTENSIONS, defaults};
use crate::core::MergeConfig;
use crate::core::seconds_to_ms;
use crate::error::AudioResult;
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 应用程序配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 输入音频目录
    pub input_dir: PathBuf,

    /// 输出目录（不存在时自动创建）
    pub output_dir: PathBuf,

    /// 最小合并时长（秒）
    pub min_duration_secs: f64,

    /// 是否显示详细信息（Debug日志级别）
    pub verbose: bool,

    /// 只打印分组计划，不写任何文件
    pub dry_run: bool,

    /// JSON报告输出路径（可选）
    pub report_path: Option<PathBuf>,

    /// 日志文件路径（可选）
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// 从解析结果构造配置
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input_dir: matches
                .get_one::<PathBuf>("input-dir")
                .cloned()
                .unwrap_or_default(),
            output_dir: matches
                .get_one::<PathBuf>("output-dir")
                .cloned()
                .unwrap_or_default(),
            min_duration_secs: matches
                .get_one::<f64>("min-duration")
                .copied()
                .unwrap_or(defaults::MIN_DURATION_SECONDS),
            verbose: matches.get_flag("verbose"),
            dry_run: matches.get_flag("dry-run"),
            report_path: matches.get_one::<PathBuf>("report").cloned(),
            log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        }
    }

    /// 转换为核心流程配置
    pub fn to_merge_config(&self) -> AudioResult<MergeConfig> {
        Ok(MergeConfig::from_seconds(
            &self.input_dir,
            &self.output_dir,
            self.min_duration_secs,
        )?
        .with_dry_run(self.dry_run))
    }
}

/// 最小时长参数校验：有限正数，且至少1毫秒
fn parse_min_duration(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("无效的时长 / invalid duration: {value}"))?;
    seconds_to_ms(seconds).map_err(|e| e.to_string())?;
    Ok(seconds)
}

/// 构建命令行定义
pub fn build_cli() -> Command {
    Command::new("audio-merge")
        .version(VERSION)
        .about(DESCRIPTION)
        .after_help(format!(
            "支持的格式 / Supported formats: {}",
            SUPPORTED_EXTENSIONS.join(", ")
        ))
        .arg(
            Arg::new("input-dir")
                .long("input-dir")
                .short('i')
                .help("输入音频目录 / Input directory containing audio clips")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("输出目录 / Output directory for merged files")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("min-duration")
                .long("min-duration")
                .short('d')
                .help("合并后最小时长（秒）/ Minimum merged duration in seconds")
                .value_name("SECONDS")
                .value_parser(parse_min_duration)
                .default_value(defaults::MIN_DURATION_ARG),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息 / Enable debug logging")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("只打印分组计划，不写入文件 / Print the grouping plan without writing files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("写出JSON运行报告 / Write a JSON run report")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("同时将日志写入文件 / Also write logs to a file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> AppConfig {
    AppConfig::from_matches(&build_cli().get_matches())
}

/// 从给定参数解析（便于测试）
pub fn try_parse_from<I, T>(args: I) -> Result<AppConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    build_cli()
        .try_get_matches_from(args)
        .map(|matches| AppConfig::from_matches(&matches))
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    println!("🚀 Audio Merge Tool v{VERSION} 启动");
    println!("📝 {DESCRIPTION}");
    println!("   输入目录 / Input:  {}", config.input_dir.display());
    println!("   输出目录 / Output: {}", config.output_dir.display());
    println!("   最小时长 / Min:    {}秒", config.min_duration_secs);
    if config.dry_run {
        println!("   预演模式 / Dry run: 不会写入任何文件");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_parse_min_duration() {
        assert_eq!(parse_min_duration("15").unwrap(), 15.0);
        assert_eq!(parse_min_duration(" 2.5 ").unwrap(), 2.5);
        assert!(parse_min_duration("0").is_err());
        assert!(parse_min_duration("-3").is_err());
        assert!(parse_min_duration("abc").is_err());
        assert!(parse_min_duration("inf").is_err());
        assert!(parse_min_duration("0.0001").is_err());
    }
}
