//! 命令行进程退出码测试
//!
//! 直接运行编译出的 audio-merge 可执行文件，检查各种结局的退出码

mod audio_test_fixtures;

use audio_merge_tool::tools::constants::exit_codes;
use audio_test_fixtures::Workspace;
use std::path::Path;
use std::process::Command;

fn run_cli(input: &Path, output: &Path, extra: &[&str]) -> i32 {
    let status = Command::new(env!("CARGO_BIN_EXE_audio-merge"))
        .arg("-i")
        .arg(input)
        .arg("-o")
        .arg(output)
        .args(extra)
        .output()
        .expect("无法启动 audio-merge");
    status.status.code().expect("进程被信号终止")
}

#[test]
fn test_successful_merge_exits_zero() {
    let ws = Workspace::new();
    ws.add_clip("a.wav", 600);
    ws.add_clip("b.wav", 600);

    let code = run_cli(&ws.input_dir(), &ws.output_dir(), &["-d", "1"]);
    assert_eq!(code, exit_codes::SUCCESS);
    assert_eq!(ws.output_names().len(), 1);
    println!("  ✓ 生成文件: 退出码0");
}

#[test]
fn test_file_as_input_dir_exits_one() {
    let ws = Workspace::new();
    let clip = ws.add_clip("a.wav", 600);

    let code = run_cli(&clip, &ws.output_dir(), &[]);
    assert_eq!(code, exit_codes::GENERAL_ERROR);
    println!("  ✓ 输入路径是文件: 退出码1");
}

#[test]
fn test_missing_input_dir_exits_one() {
    let ws = Workspace::new();
    let code = run_cli(&ws.root().join("missing"), &ws.output_dir(), &[]);
    assert_eq!(code, exit_codes::GENERAL_ERROR);
}

#[test]
fn test_empty_input_dir_exits_one() {
    let ws = Workspace::new();
    let code = run_cli(&ws.input_dir(), &ws.output_dir(), &[]);
    assert_eq!(code, exit_codes::GENERAL_ERROR);
    println!("  ✓ 无输出文件: 退出码1");
}

#[test]
fn test_dry_run_with_groups_exits_zero() {
    let ws = Workspace::new();
    ws.add_clip("a.wav", 600);

    let code = run_cli(&ws.input_dir(), &ws.output_dir(), &["--dry-run", "-d", "1"]);
    assert_eq!(code, exit_codes::SUCCESS);
    assert!(!ws.output_dir().exists());
}

#[test]
fn test_invalid_threshold_exits_two() {
    let ws = Workspace::new();
    ws.add_clip("a.wav", 600);

    for bad in ["0", "-3", "abc"] {
        let code = run_cli(&ws.input_dir(), &ws.output_dir(), &["-d", bad]);
        assert_eq!(code, exit_codes::USAGE_ERROR, "-d {bad}");
    }
    assert!(!ws.output_dir().exists());
    println!("  ✓ 参数错误: 退出码2");
}
