use adb_screen_grabber::{ADBDevice, ADBError, ADBResult, DeviceBridge, DeviceInfo, DisplayInfo};
use chrono::{NaiveDate, NaiveDateTime};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

/// 固定时间 2023-12-10 14:30:22
pub fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 12, 10)
        .unwrap()
        .and_hms_opt(14, 30, 22)
        .unwrap()
}

/// 可编排结果的假设备桥接
#[derive(Default)]
pub struct FakeBridge {
    pub devices: Vec<ADBDevice>,
    /// 第 n 次截图（从 0 开始）返回失败
    pub failing_captures: Vec<usize>,
    pub display: Option<DisplayInfo>,
    pub device_info: Option<DeviceInfo>,
    pub missing_bridge: bool,
    pub captured: RefCell<Vec<PathBuf>>,
    pub capture_calls: Cell<usize>,
    pub selected: Option<String>,
}

impl FakeBridge {
    pub fn with_device() -> Self {
        Self {
            devices: vec![ADBDevice::new("emulator-5554", "device")],
            display: Some(DisplayInfo::new(1080, 2400, 420)),
            device_info: Some(DeviceInfo {
                model: "Pixel 7".to_string(),
                android_version: "14".to_string(),
            }),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, calls: &[usize]) -> Self {
        self.failing_captures = calls.to_vec();
        self
    }

    pub fn saved(&self) -> Vec<PathBuf> {
        self.captured.borrow().clone()
    }
}

impl DeviceBridge for FakeBridge {
    fn list_devices(&self) -> ADBResult<Vec<ADBDevice>> {
        if self.missing_bridge {
            return Err(ADBError::BridgeNotFound("adb".to_string()));
        }
        Ok(self.devices.clone())
    }

    fn capture_screenshot(&self, path: &Path) -> ADBResult<()> {
        let call = self.capture_calls.get();
        self.capture_calls.set(call + 1);

        if self.failing_captures.contains(&call) {
            return Err(ADBError::CommandError("ADB pull 命令失败: device offline".to_string()));
        }

        fs::write(path, b"\x89PNG\r\n\x1a\n")?;
        self.captured.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn query_device_info(&self) -> ADBResult<DeviceInfo> {
        self.device_info
            .clone()
            .ok_or_else(|| ADBError::DeviceError("getprop 失败".to_string()))
    }

    fn query_resolution(&self) -> ADBResult<DisplayInfo> {
        self.display
            .ok_or_else(|| ADBError::ParseError("无法解析 wm size 输出".to_string()))
    }

    fn select_device(&mut self, device_id: &str) {
        self.selected = Some(device_id.to_string());
    }
}
