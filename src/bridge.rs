use crate::device::{ADBDevice, ADB};
use crate::error::ADBResult;
use crate::media::{DeviceInfo, DisplayInfo};
use log::debug;
use std::path::Path;

/// 截图会话依赖的设备桥接操作
///
/// 所有调用都是同步阻塞的，测试中可以替换为假实现。
pub trait DeviceBridge {
    /// 列出已连接的设备
    fn list_devices(&self) -> ADBResult<Vec<ADBDevice>>;

    /// 截图并保存到本地路径
    fn capture_screenshot(&self, path: &Path) -> ADBResult<()>;

    /// 查询设备型号与系统版本
    fn query_device_info(&self) -> ADBResult<DeviceInfo>;

    /// 查询屏幕分辨率与密度
    fn query_resolution(&self) -> ADBResult<DisplayInfo>;

    /// 会话确定目标设备后调用，默认忽略
    fn select_device(&mut self, _device_id: &str) {}
}

/// 基于 adb 命令行的桥接实现
#[derive(Debug, Clone)]
pub struct AdbBridge {
    adb: ADB,
    device_id: String,
}

impl AdbBridge {
    /// 使用配置中的序列号作为目标设备
    pub fn new(adb: ADB) -> Self {
        let device_id = adb.config.serial.clone().unwrap_or_default();
        Self { adb, device_id }
    }
}

impl DeviceBridge for AdbBridge {
    fn list_devices(&self) -> ADBResult<Vec<ADBDevice>> {
        let version = self.adb.check_adb()?;
        debug!("使用 {}", version);
        self.adb.list_devices()
    }

    fn capture_screenshot(&self, path: &Path) -> ADBResult<()> {
        self.adb.take_screenshot(&self.device_id, path)
    }

    fn query_device_info(&self) -> ADBResult<DeviceInfo> {
        Ok(self.adb.get_device_info(&self.device_id))
    }

    fn query_resolution(&self) -> ADBResult<DisplayInfo> {
        self.adb.get_display_info(&self.device_id)
    }

    fn select_device(&mut self, device_id: &str) {
        self.device_id = device_id.to_string();
    }
}
