use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认截图输出目录
pub const DEFAULT_OUTPUT_DIR: &str = "screenshots";

/// 设备上存放临时截图的目录
pub const DEFAULT_DEVICE_TMP_DIR: &str = "/sdcard";

/// ADB 配置结构体
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ADBConfig {
    /// ADB 可执行文件路径
    pub path: PathBuf,
    /// 目标设备序列号，为空时交给 adb 自行选择
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// 设备端临时目录
    pub device_tmp_dir: String,
    /// 额外的命令行参数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_args: Option<Vec<String>>,
}

impl Default for ADBConfig {
    fn default() -> Self {
        ADBConfig {
            path: PathBuf::from("adb"),
            serial: None,
            device_tmp_dir: DEFAULT_DEVICE_TMP_DIR.to_string(),
            additional_args: None,
        }
    }
}

/// ADB 配置构建器
#[derive(Default)]
pub struct ADBConfigBuilder {
    path: Option<PathBuf>,
    serial: Option<String>,
    device_tmp_dir: Option<String>,
    additional_args: Option<Vec<String>>,
}

impl ADBConfigBuilder {
    /// 设置 ADB 可执行文件路径
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 指定目标设备
    pub fn serial(mut self, serial: &str) -> Self {
        self.serial = Some(serial.to_string());
        self
    }

    /// 设置设备端临时目录
    pub fn device_tmp_dir(mut self, dir: &str) -> Self {
        self.device_tmp_dir = Some(dir.trim_end_matches('/').to_string());
        self
    }

    /// 添加额外命令行参数
    pub fn add_arg(mut self, arg: &str) -> Self {
        self.additional_args
            .get_or_insert_with(Vec::new)
            .push(arg.to_string());
        self
    }

    /// 构建 ADB 配置
    pub fn build(self) -> ADBConfig {
        let default = ADBConfig::default();

        ADBConfig {
            path: self.path.unwrap_or(default.path),
            serial: self.serial.filter(|s| !s.trim().is_empty()),
            device_tmp_dir: self.device_tmp_dir.unwrap_or(default.device_tmp_dir),
            additional_args: self.additional_args,
        }
    }
}

/// 截图会话配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// 截图保存目录
    pub output_dir: PathBuf,
    /// 是否把用户输入的名称中的特殊字符替换为下划线
    pub sanitize_names: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            sanitize_names: false,
        }
    }
}

impl CaptureConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        CaptureConfig {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize_names = sanitize;
        self
    }
}
