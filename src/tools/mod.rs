//! 工具模块集合
//!
//! 包含CLI、日志、格式化等工具模块，支持main.rs的流程控制。

pub mod cli;
pub mod constants;
pub mod formatter;
pub mod logging;
pub mod outcome;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{AppConfig, build_cli, parse_args, show_startup_info, try_parse_from};
pub use formatter::{
    format_artifact_table, format_group_plan, format_summary, report_to_json, write_json_report,
};
pub use logging::init_logging;
pub use outcome::{RunFailure, exit_code_for};
