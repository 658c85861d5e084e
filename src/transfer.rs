use crate::device::ADB;
use crate::error::{ADBError, ADBResult};
use log::{debug, info};
use std::path::Path;

impl ADB {
    /// 文件拉取
    pub fn pull(&self, device_id: &str, device_path: &str, local_path: &Path) -> ADBResult<()> {
        let mut cmd = self.command(device_id);
        cmd.arg("pull").arg(device_path).arg(local_path);

        info!(
            "开始从设备拉取文件: {} -> {}",
            device_path,
            local_path.display()
        );
        let output = self.execute(cmd, "pull")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ADBError::CommandError(format!(
                "ADB pull 命令失败: {}",
                stderr.trim()
            )));
        }

        // 确认文件已落盘
        if !local_path.is_file() {
            return Err(ADBError::FileError(format!(
                "拉取后未找到本地文件: {}",
                local_path.display()
            )));
        }

        debug!("成功拉取文件 {} 到 {}", device_path, local_path.display());
        Ok(())
    }
}
