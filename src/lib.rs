mod error;
mod config;
mod device;
mod cmd;

// 功能模块
pub mod transfer;
pub mod media;
pub mod resource;
pub mod utils;
pub mod naming;
pub mod bridge;
pub mod session;

// 导出主要类型
pub use config::{ADBConfig, ADBConfigBuilder, CaptureConfig, DEFAULT_DEVICE_TMP_DIR, DEFAULT_OUTPUT_DIR};
pub use device::{ADB, ADBDevice, DeviceStatus};
pub use error::{ADBError, ADBResult};
pub use cmd::parse_device_list;
pub use bridge::{AdbBridge, DeviceBridge};
pub use media::{DeviceInfo, DisplayInfo};
pub use naming::CaptureName;
pub use session::{CaptureOutcome, CaptureSession, Input, SessionState, SessionSummary, SingleShot};

// 便利的预导出模块
pub mod prelude {
    pub use super::{ADB, ADBConfig, ADBConfigBuilder, ADBDevice, ADBError, ADBResult};
    pub use super::{AdbBridge, CaptureConfig, CaptureSession, DeviceBridge, SingleShot};
}
