//! 交互式截图会话
//!
//! 会话是一个显式的有限状态循环：`Prompting` 读取一行输入并分类，
//! `Dispatching` 执行对应操作，`Terminated` 结束循环。计数器保存在
//! [`SessionState`] 中，只由循环本身修改。

use crate::bridge::DeviceBridge;
use crate::config::CaptureConfig;
use crate::device::ADBDevice;
use crate::error::{ADBError, ADBResult};
use crate::media::DeviceInfo;
use crate::naming::{auto_label, capture_path, sanitize_label, CaptureName};
use crate::utils::display_path;
use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// 交互提示语
pub const PROMPT: &str = "输入截图名称（回车自动命名，i=设备信息，q=退出）: ";

const RULE_WIDTH: usize = 60;

/// 会话结束时的摘要
///
/// 与会话共享成功计数，可以在 Ctrl-C 处理线程中打印。
#[derive(Debug, Clone)]
pub struct SessionSummary {
    captured: Arc<AtomicU32>,
    output_dir: PathBuf,
}

impl SessionSummary {
    pub fn captured(&self) -> u32 {
        self.captured.load(Ordering::SeqCst)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> ADBResult<()> {
        writeln!(out)?;
        writeln!(out, "✅ 完成！共截图 {} 张", self.captured())?;
        writeln!(out, "📁 位置: {}", display_path(&self.output_dir).display())?;
        out.flush()?;
        Ok(())
    }
}

/// 会话状态：输出目录与计数器
///
/// 成功计数只由捕获循环递增，摘要句柄只读。
#[derive(Debug)]
pub struct SessionState {
    output_dir: PathBuf,
    auto_counter: u32,
    captured: Arc<AtomicU32>,
}

impl SessionState {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            auto_counter: 0,
            captured: Arc::new(AtomicU32::new(0)),
        }
    }

    /// 递增自动计数并返回新的标签
    pub fn next_auto_label(&mut self) -> String {
        self.auto_counter += 1;
        auto_label(self.auto_counter)
    }

    pub fn record_success(&mut self) {
        self.captured.fetch_add(1, Ordering::SeqCst);
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn auto_counter(&self) -> u32 {
        self.auto_counter
    }

    /// 成功保存的截图数量
    pub fn captured(&self) -> u32 {
        self.captured.load(Ordering::SeqCst)
    }

    /// 共享成功计数的摘要句柄
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            captured: Arc::clone(&self.captured),
            output_dir: self.output_dir.clone(),
        }
    }
}

/// 一行用户输入的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    Info,
    Auto,
    Named(String),
}

impl Input {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("q") {
            Input::Quit
        } else if trimmed.eq_ignore_ascii_case("i") {
            Input::Info
        } else if trimmed.is_empty() {
            Input::Auto
        } else {
            Input::Named(trimmed.to_string())
        }
    }
}

/// 捕获循环的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Prompting,
    Dispatching(Input),
    Terminated,
}

/// 单次截图的结果
#[derive(Debug)]
pub enum CaptureOutcome {
    Saved(PathBuf),
    Failed(ADBError),
}

/// 单次截图模式的参数
#[derive(Debug, Clone, Default)]
pub struct SingleShot {
    /// `--single` 的值：名称或 `auto`
    pub single: String,
    /// `--name` 提供的名称，优先于 `single`
    pub name: Option<String>,
}

impl SingleShot {
    pub fn new(single: impl Into<String>, name: Option<String>) -> Self {
        Self {
            single: single.into(),
            name,
        }
    }

    pub fn capture_name(&self) -> CaptureName {
        if let CaptureName::Named(name) = CaptureName::from_option(self.name.as_deref()) {
            return CaptureName::Named(name);
        }

        let single = self.single.trim();
        if single.eq_ignore_ascii_case("auto") {
            return CaptureName::Auto;
        }
        CaptureName::from_option(Some(single.strip_suffix(".png").unwrap_or(single)))
    }
}

/// 确保输出目录存在
pub fn ensure_output_dir(dir: &Path) -> ADBResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        ADBError::FileError(format!("无法创建输出目录 {}: {}", dir.display(), e))
    })
}

/// 启动失败时的诊断信息
pub fn report_startup_error<W: Write>(err: &ADBError, out: &mut W) -> ADBResult<()> {
    match err {
        ADBError::BridgeNotFound(path) => {
            writeln!(out, "❌ 找不到 ADB ({})！", path)?;
            writeln!(out)?;
            writeln!(out, "请安装 Android Platform Tools，例如：")?;
            writeln!(out, "  brew install android-platform-tools")?;
            writeln!(out, "  sudo apt install android-tools-adb")?;
        }
        ADBError::DeviceNotFound(detail) => {
            writeln!(out, "❌ 没有连接的 Android 设备！({})", detail)?;
            writeln!(out)?;
            writeln!(out, "请确认：")?;
            writeln!(out, "  1. 手机已通过 USB 连接")?;
            writeln!(out, "  2. 已开启 USB 调试")?;
            writeln!(out, "  3. 已在手机上授权此电脑")?;
        }
        other => writeln!(out, "❌ 运行 ADB 出错: {}", other)?,
    }
    out.flush()?;
    Ok(())
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 截图会话
pub struct CaptureSession<B: DeviceBridge> {
    bridge: B,
    config: CaptureConfig,
    state: SessionState,
    clock: fn() -> NaiveDateTime,
}

impl<B: DeviceBridge> CaptureSession<B> {
    pub fn new(bridge: B, config: CaptureConfig) -> Self {
        let state = SessionState::new(config.output_dir.clone());
        Self {
            bridge,
            config,
            state,
            clock: local_now,
        }
    }

    /// 替换时间来源
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// 检查桥接工具与设备连接，选定目标设备
    ///
    /// 有指定设备时要求其在线，否则选择第一个在线设备。
    pub fn connect<W: Write>(&mut self, preferred: Option<&str>, out: &mut W) -> ADBResult<ADBDevice> {
        let devices = self.bridge.list_devices()?;

        let device = match preferred {
            Some(id) => devices.iter().find(|d| d.id == id && d.is_online()),
            None => devices.iter().find(|d| d.is_online()),
        };

        let Some(device) = device.cloned() else {
            let detail = match preferred {
                Some(id) => format!("设备 {} 不在线", id),
                None if devices.is_empty() => "未检测到设备".to_string(),
                None => devices
                    .iter()
                    .map(|d| format!("{} ({})", d.id, d.status))
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            return Err(ADBError::DeviceNotFound(detail));
        };

        self.bridge.select_device(&device.id);
        info!("选定设备 {} ({})", device.id, device.name);
        writeln!(out, "✅ 已连接设备: {}", device.id)?;
        Ok(device)
    }

    /// 执行一次截图，失败不会中断会话
    ///
    /// 返回的 `Err` 只表示输出写入失败。
    pub fn capture<W: Write>(&mut self, name: CaptureName, out: &mut W) -> ADBResult<CaptureOutcome> {
        let label = match name {
            CaptureName::Auto => self.state.next_auto_label(),
            CaptureName::Named(name) if self.config.sanitize_names => sanitize_label(&name),
            CaptureName::Named(name) => name,
        };
        write!(out, "📸 正在截图... ")?;
        out.flush()?;

        let path = match capture_path(self.state.output_dir(), &label, &(self.clock)()) {
            Ok(path) => path,
            Err(e) => {
                warn!("拒绝截图名称 {}: {}", label, e);
                writeln!(out, "❌ 截图失败: {}", e)?;
                return Ok(CaptureOutcome::Failed(e));
            }
        };

        if path.exists() {
            warn!("目标文件已存在，将被覆盖: {}", path.display());
            writeln!(out, "⚠️ 文件已存在，将被覆盖: {}", path.display())?;
        }

        match self.bridge.capture_screenshot(&path) {
            Ok(()) => {
                self.state.record_success();
                info!("截图已保存: {}", path.display());
                writeln!(out, "✅ 已保存: {}", path.display())?;
                Ok(CaptureOutcome::Saved(path))
            }
            Err(e) => {
                warn!("截图 {} 失败: {}", label, e);
                writeln!(out, "❌ 截图失败: {}", e)?;
                Ok(CaptureOutcome::Failed(e))
            }
        }
    }

    /// 打印设备与屏幕信息
    pub fn show_device_info<W: Write>(&self, out: &mut W) -> ADBResult<()> {
        let device = self.bridge.query_device_info().unwrap_or_else(|e| {
            warn!("查询设备信息失败: {}", e);
            DeviceInfo::unknown()
        });
        writeln!(out, "📱 设备: {}", device)?;

        match self.bridge.query_resolution() {
            Ok(display) => {
                writeln!(
                    out,
                    "📐 分辨率: {}x{}px (物理) | {}x{}dp (逻辑)",
                    display.width_px, display.height_px, display.width_dp, display.height_dp
                )?;
                writeln!(out, "   密度: {} DPI", display.density)?;
            }
            Err(e) => {
                warn!("查询分辨率失败: {}", e);
                writeln!(out, "📐 分辨率: 无法检测")?;
            }
        }
        Ok(())
    }

    fn print_banner<W: Write>(&self, out: &mut W) -> ADBResult<()> {
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "  Android 截图工具")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn print_instructions<W: Write>(&self, out: &mut W) -> ADBResult<()> {
        writeln!(out, "💾 保存到: {}", display_path(self.state.output_dir()).display())?;
        writeln!(out)?;
        writeln!(out, "使用说明:")?;
        writeln!(out, "  • 在手机上正常操作应用")?;
        writeln!(out, "  • 输入页面名称（如 login、dashboard）后回车即可截图")?;
        writeln!(out, "  • 直接回车则自动命名")?;
        writeln!(out, "  • 输入 i 回车查看设备信息")?;
        writeln!(out, "  • 输入 q 回车退出")?;
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "准备就绪，开始截图...")?;
        writeln!(out)?;
        Ok(())
    }

    fn print_summary<W: Write>(&self, out: &mut W) -> ADBResult<()> {
        self.state.summary().write_to(out)
    }

    /// 启动交互模式：检查设备、打印说明后进入捕获循环
    pub fn start_interactive<R: BufRead, W: Write>(
        &mut self,
        preferred: Option<&str>,
        input: R,
        out: &mut W,
    ) -> ADBResult<u32> {
        self.print_banner(out)?;
        self.connect(preferred, out)?;
        self.show_device_info(out)?;
        self.print_instructions(out)?;
        self.run_loop(input, out)
    }

    /// 捕获循环，返回成功截图数量
    ///
    /// 输入结束（EOF）等同于 `q`。
    pub fn run_loop<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> ADBResult<u32> {
        let mut state = LoopState::Prompting;
        let mut buf = Vec::new();

        loop {
            state = match state {
                LoopState::Prompting => {
                    write!(out, "{}", PROMPT)?;
                    out.flush()?;

                    // 按字节读取，非 UTF-8 的输入（如 GBK 终端）不会中断会话
                    buf.clear();
                    if input.read_until(b'\n', &mut buf)? == 0 {
                        debug!("输入结束，退出会话");
                        writeln!(out)?;
                        LoopState::Dispatching(Input::Quit)
                    } else {
                        let line = String::from_utf8_lossy(&buf);
                        LoopState::Dispatching(Input::classify(&line))
                    }
                }
                LoopState::Dispatching(Input::Quit) => {
                    self.print_summary(out)?;
                    LoopState::Terminated
                }
                LoopState::Dispatching(Input::Info) => {
                    self.show_device_info(out)?;
                    LoopState::Prompting
                }
                LoopState::Dispatching(Input::Auto) => {
                    self.capture(CaptureName::Auto, out)?;
                    LoopState::Prompting
                }
                LoopState::Dispatching(Input::Named(name)) => {
                    self.capture(CaptureName::Named(name), out)?;
                    LoopState::Prompting
                }
                LoopState::Terminated => break,
            };
        }

        out.flush()?;
        Ok(self.state.captured())
    }

    /// 单次截图模式：检查设备后截图一次并返回路径
    pub fn run_single<W: Write>(
        &mut self,
        preferred: Option<&str>,
        request: &SingleShot,
        out: &mut W,
    ) -> ADBResult<PathBuf> {
        self.connect(preferred, out)?;

        match self.capture(request.capture_name(), out)? {
            CaptureOutcome::Saved(path) => Ok(path),
            CaptureOutcome::Failed(e) => Err(e),
        }
    }
}
