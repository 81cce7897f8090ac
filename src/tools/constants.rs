//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 默认配置值
pub mod defaults {
    /// 默认最小合并时长（秒）
    pub const MIN_DURATION_SECONDS: f64 = 15.0;

    /// 默认最小合并时长的命令行文本形式
    pub const MIN_DURATION_ARG: &str = "15.0";
}

/// 受支持的输入扩展名（小写，大小写不敏感匹配）
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["mp3", "wav", "flac", "ogg", "m4a", "aac"];

/// 进程退出码
pub mod exit_codes {
    /// 至少生成一个合并文件（或预演模式下至少有一个分组）
    pub const SUCCESS: i32 = 0;
    /// 未生成任何文件、输入目录不存在等通用错误
    pub const GENERAL_ERROR: i32 = 1;
    /// 参数错误（clap 自身的解析错误同样使用 2）
    pub const USAGE_ERROR: i32 = 2;
}
