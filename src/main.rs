//! adb-screen-grabber 命令行入口
//!
//! 通过 ADB 从 Android 设备截图，交互式输入页面名称并保存带时间戳的 PNG。

use adb_screen_grabber::prelude::*;
use adb_screen_grabber::session::{ensure_output_dir, report_startup_error, SessionSummary};
use adb_screen_grabber::{DEFAULT_DEVICE_TMP_DIR, DEFAULT_OUTPUT_DIR};
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// 通过 ADB 从 Android 设备截图
#[derive(Parser, Debug)]
#[command(name = "adb-screen-grabber")]
#[command(version, about, long_about = None)]
#[command(after_help = "示例:
  # 交互模式（逐次输入页面名称）
  adb-screen-grabber

  # 保存到自定义目录
  adb-screen-grabber --output my_app_screens

  # 单次截图，自动命名
  adb-screen-grabber --single auto

  # 单次截图，指定名称
  adb-screen-grabber --single login --name login_screen")]
struct Cli {
    /// 截图输出目录
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// 截一张图后退出，值为名称或 auto
    #[arg(short, long)]
    single: Option<String>,

    /// 文件名中使用的页面名称（配合 --single）
    #[arg(short, long)]
    name: Option<String>,

    /// 目标设备序列号
    #[arg(long, env = "ANDROID_SERIAL")]
    serial: Option<String>,

    /// ADB 可执行文件路径
    #[arg(long = "adb", env = "ADB_PATH", default_value = "adb")]
    adb_path: PathBuf,

    /// 设备上存放临时截图的目录
    #[arg(long, default_value = DEFAULT_DEVICE_TMP_DIR)]
    device_tmp_dir: String,

    /// 将名称中的特殊字符替换为下划线
    #[arg(long)]
    sanitize: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut builder = ADBConfigBuilder::default()
        .path(&cli.adb_path)
        .device_tmp_dir(&cli.device_tmp_dir);
    if let Some(serial) = &cli.serial {
        builder = builder.serial(serial);
    }
    let adb_config = builder.build();
    let preferred = adb_config.serial.clone();

    let capture_config = CaptureConfig::new(&cli.output).with_sanitize(cli.sanitize);
    ensure_output_dir(&capture_config.output_dir)
        .with_context(|| format!("准备输出目录 {}", cli.output.display()))?;

    let bridge = AdbBridge::new(ADB::new(Some(adb_config)));
    let mut session = CaptureSession::new(bridge, capture_config);
    // 不长期持有 stdout 锁，Ctrl-C 处理线程需要写出摘要
    let mut stdout = io::stdout();

    let result = match &cli.single {
        Some(single) => {
            let request = SingleShot::new(single.clone(), cli.name.clone());
            session
                .run_single(preferred.as_deref(), &request, &mut stdout)
                .map(|_| ())
        }
        None => {
            install_interrupt_summary(session.state().summary());
            let stdin = io::stdin().lock();
            session
                .start_interactive(preferred.as_deref(), stdin, &mut stdout)
                .map(|_| ())
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_fatal() => {
            report_startup_error(&e, &mut stdout)?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            log::error!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Ctrl-C 时仍打印截图摘要，然后正常退出
fn install_interrupt_summary(summary: SessionSummary) {
    let result = ctrlc::set_handler(move || {
        let mut stdout = io::stdout();
        let _ = writeln!(stdout);
        let _ = summary.write_to(&mut stdout);
        std::process::exit(0);
    });

    if let Err(e) = result {
        log::warn!("无法注册 Ctrl-C 处理器: {}", e);
    }
}
