use crate::device::ADB;
use crate::error::ADBResult;
use crate::utils::{parse_physical_density, parse_physical_size, px_to_dp};
use log::{debug, warn};
use std::fmt;
use std::path::Path;

/// 属性缺失时的占位值
pub const UNKNOWN: &str = "Unknown";

/// 设备型号与系统版本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub model: String,
    pub android_version: String,
}

impl DeviceInfo {
    pub fn unknown() -> Self {
        Self {
            model: UNKNOWN.to_string(),
            android_version: UNKNOWN.to_string(),
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Android {})", self.model, self.android_version)
    }
}

/// 屏幕分辨率信息：物理像素、逻辑 dp 与密度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    pub width_px: u32,
    pub height_px: u32,
    pub density: u32,
    pub width_dp: u32,
    pub height_dp: u32,
}

impl DisplayInfo {
    /// 由物理分辨率和密度计算逻辑分辨率
    pub fn new(width_px: u32, height_px: u32, density: u32) -> Self {
        Self {
            width_px,
            height_px,
            density,
            width_dp: px_to_dp(width_px, density),
            height_dp: px_to_dp(height_px, density),
        }
    }

    /// 从 `wm size` 与 `wm density` 的输出构建
    pub fn parse(size_output: &str, density_output: &str) -> ADBResult<Self> {
        let (width, height) = parse_physical_size(size_output)?;
        let density = parse_physical_density(density_output)?;
        Ok(Self::new(width, height, density))
    }
}

impl ADB {
    /// 从设备截图并保存到本地路径
    ///
    /// 截图先写入设备临时目录再拉取到本地，临时文件无论成功与否都会被删除。
    pub fn take_screenshot(&self, device_id: &str, output_path: &Path) -> ADBResult<()> {
        self.with_resources(device_id, |resources| {
            let device_path = resources.temp_file("screenshot", ".png");

            self.shell(device_id, &format!("screencap -p {}", device_path))?;
            self.pull(device_id, &device_path, output_path)?;

            debug!("截图已保存到 {}", output_path.display());
            Ok(())
        })
    }

    /// 获取设备型号与 Android 版本，查询失败的字段记为 Unknown
    pub fn get_device_info(&self, device_id: &str) -> DeviceInfo {
        let query = |prop: &str| match self.get_prop(device_id, prop) {
            Ok(value) if !value.is_empty() => value,
            Ok(_) => UNKNOWN.to_string(),
            Err(e) => {
                warn!("读取属性 {} 失败: {}", prop, e);
                UNKNOWN.to_string()
            }
        };

        DeviceInfo {
            model: query("ro.product.model"),
            android_version: query("ro.build.version.release"),
        }
    }

    /// 获取屏幕分辨率与密度
    pub fn get_display_info(&self, device_id: &str) -> ADBResult<DisplayInfo> {
        let size_output = self.shell(device_id, "wm size")?;
        let density_output = self.shell(device_id, "wm density")?;
        DisplayInfo::parse(&size_output, &density_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_info_from_wm_output() {
        let info = DisplayInfo::parse("Physical size: 1080x2400\n", "Physical density: 420\n").unwrap();
        assert_eq!(info, DisplayInfo::new(1080, 2400, 420));
        assert_eq!((info.width_dp, info.height_dp), (412, 915));
    }

    #[test]
    fn display_info_requires_density() {
        assert!(DisplayInfo::parse("Physical size: 1080x2400", "").is_err());
    }

    #[test]
    fn device_info_display() {
        let info = DeviceInfo {
            model: "Pixel 7".to_string(),
            android_version: "14".to_string(),
        };
        assert_eq!(info.to_string(), "Pixel 7 (Android 14)");
        assert_eq!(DeviceInfo::unknown().to_string(), "Unknown (Android Unknown)");
    }
}
