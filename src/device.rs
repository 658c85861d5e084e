use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ADBConfig;

/// ADB 设备状态枚举
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
    Unauthorized,
    Recovery,
    Sideload,
    Bootloader,
    Other(String),
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceStatus::Online => write!(f, "online"),
            DeviceStatus::Offline => write!(f, "offline"),
            DeviceStatus::Unauthorized => write!(f, "unauthorized"),
            DeviceStatus::Recovery => write!(f, "recovery"),
            DeviceStatus::Sideload => write!(f, "sideload"),
            DeviceStatus::Bootloader => write!(f, "bootloader"),
            DeviceStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for DeviceStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "device" | "online" => DeviceStatus::Online,
            "offline" => DeviceStatus::Offline,
            "unauthorized" => DeviceStatus::Unauthorized,
            "recovery" => DeviceStatus::Recovery,
            "sideload" => DeviceStatus::Sideload,
            "bootloader" | "fastboot" => DeviceStatus::Bootloader,
            _ => DeviceStatus::Other(s.to_string()),
        }
    }
}

/// ADB 设备结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ADBDevice {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_id: Option<String>,
    pub status: DeviceStatus,
}

impl ADBDevice {
    /// 创建新设备实例
    pub fn new(id: &str, status: impl Into<DeviceStatus>) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Device {}", id),
            model: None,
            product: None,
            transport_id: None,
            status: status.into(),
        }
    }

    /// 检查设备是否在线
    pub fn is_online(&self) -> bool {
        self.status == DeviceStatus::Online
    }

    /// 设置设备名称
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// 设置设备模型
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// 设置设备产品信息
    pub fn with_product(mut self, product: &str) -> Self {
        self.product = Some(product.to_string());
        self
    }

    /// 设置传输 ID
    pub fn with_transport_id(mut self, transport_id: &str) -> Self {
        self.transport_id = Some(transport_id.to_string());
        self
    }

    /// 解析 `adb devices -l` 的一行输出
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return None;
        }

        let mut device = ADBDevice::new(parts[0], parts[1]);

        for part in &parts[2..] {
            if let Some(model) = part.strip_prefix("model:") {
                // 使用型号作为设备名称
                device = device.with_model(model).with_name(model);
            } else if let Some(product) = part.strip_prefix("product:") {
                device = device.with_product(product);
            } else if let Some(transport) = part.strip_prefix("transport_id:") {
                device = device.with_transport_id(transport);
            }
        }

        Some(device)
    }
}

/// ADB 主结构体
#[derive(Clone, Debug, Default)]
pub struct ADB {
    pub config: ADBConfig,
}

impl ADB {
    /// 创建新的 ADB 实例
    pub fn new(config: Option<ADBConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }
}
