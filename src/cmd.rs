use crate::device::{ADBDevice, ADB};
use crate::error::{ADBError, ADBResult};
use log::{debug, info, trace, warn};
use std::io;
use std::process::{Command, Output};

impl ADB {
    /// 构建带全局参数和设备 ID 的 ADB 命令
    pub(crate) fn command(&self, device_id: &str) -> Command {
        let mut cmd = Command::new(&self.config.path);

        // 添加全局附加参数（如果有）
        if let Some(additional_args) = &self.config.additional_args {
            cmd.args(additional_args);
        }

        if !device_id.is_empty() {
            cmd.arg("-s").arg(device_id);
        }

        cmd
    }

    /// 执行命令并区分 "找不到 ADB" 与其他启动失败
    pub(crate) fn execute(&self, mut cmd: Command, what: &str) -> ADBResult<Output> {
        cmd.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ADBError::BridgeNotFound(self.config.path.display().to_string())
            } else {
                ADBError::CommandError(format!("无法执行 ADB {}: {}", what, e))
            }
        })
    }

    /// 检查 ADB 是否可用并获取版本
    pub fn check_adb(&self) -> ADBResult<String> {
        let mut cmd = self.command("");
        cmd.arg("version");
        let output = self.execute(cmd, "version")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ADBError::CommandError(format!("ADB 命令失败: {}", stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version_line = stdout
            .lines()
            .next()
            .ok_or_else(|| ADBError::CommandError("无法解析 ADB 版本".to_string()))?;

        debug!("ADB 版本检查成功: {}", version_line);
        Ok(version_line.to_string())
    }

    /// 列出可用设备
    pub fn list_devices(&self) -> ADBResult<Vec<ADBDevice>> {
        let mut cmd = self.command("");
        cmd.arg("devices").arg("-l"); // 长格式以获取更多详细信息
        let output = self.execute(cmd, "devices")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ADBError::CommandError(format!(
                "ADB devices 命令失败: {}",
                stderr
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!("ADB devices 输出: {}", stdout);

        let devices = parse_device_list(&stdout);
        info!("发现 {} 个 ADB 设备", devices.len());
        Ok(devices)
    }

    /// 在设备上执行 shell 命令
    pub fn shell(&self, device_id: &str, command: &str) -> ADBResult<String> {
        let mut cmd = self.command(device_id);
        cmd.arg("shell").arg(command);

        debug!("执行 shell 命令: {}", command);
        let output = self.execute(cmd, "shell")?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let error_msg = if !stderr.trim().is_empty() { stderr } else { stdout };
            return Err(ADBError::DeviceError(format!(
                "ADB shell 命令失败: {}",
                error_msg.trim()
            )));
        }

        if !stderr.trim().is_empty() {
            warn!("ADB shell 命令产生了 stderr 输出: {}", stderr.trim());
        }

        trace!("Shell 命令 '{}' 输出: {}", command, stdout);
        Ok(stdout)
    }

    /// 获取设备属性
    pub fn get_prop(&self, device_id: &str, prop_name: &str) -> ADBResult<String> {
        let command = format!("getprop {}", prop_name);
        let output = self.shell(device_id, &command)?;
        Ok(output.trim().to_string())
    }
}

/// 解析 `adb devices -l` 的完整输出
///
/// 跳过标题行、空行以及 `* daemon ...` 之类的服务端提示。
pub fn parse_device_list(output: &str) -> Vec<ADBDevice> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("List of devices") && !line.starts_with('*'))
        .filter_map(ADBDevice::parse_line)
        .collect()
}
