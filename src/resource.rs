use crate::device::ADB;
use crate::error::{ADBError, ADBResult};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 资源管理器结构体
///
/// 负责跟踪和清理设备上的临时文件
pub struct ResourceManager {
    device_id: String,
    temp_files: Vec<String>,
    start_time: Instant,
    adb: Arc<ADB>,
}

impl ResourceManager {
    /// 创建新的资源管理器
    pub fn new(adb: Arc<ADB>, device_id: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            temp_files: Vec::new(),
            start_time: Instant::now(),
            adb,
        }
    }

    /// 生成设备上唯一的临时文件路径并加入跟踪
    pub fn temp_file(&mut self, prefix: &str, suffix: &str) -> String {
        let path = format!(
            "{}/{}_{}_{}{}",
            self.adb.config.device_tmp_dir,
            prefix,
            chrono::Local::now().format("%Y%m%d_%H%M%S"),
            rand::random::<u32>(),
            suffix
        );
        self.track_temp_file(&path);
        path
    }

    /// 添加临时文件到跟踪列表
    pub fn track_temp_file(&mut self, path: &str) {
        self.temp_files.push(path.to_string());
        debug!("添加临时文件到跟踪: {}", path);
    }

    /// 手动清理所有跟踪的临时文件
    pub fn cleanup(&mut self) -> ADBResult<()> {
        let mut errors = Vec::new();

        for file in &self.temp_files {
            match self.adb.shell(&self.device_id, &format!("rm -f {}", file)) {
                Ok(_) => debug!("已删除临时文件: {}", file),
                Err(e) => {
                    warn!("删除临时文件 {} 失败: {}", file, e);
                    errors.push(format!("文件 {}: {}", file, e));
                }
            }
        }

        self.temp_files.clear();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ADBError::FileError(format!(
                "清理临时文件时发生错误: {}",
                errors.join(", ")
            )))
        }
    }

    /// 获取操作持续时间
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// 超出作用域时自动清理设备上的临时文件
impl Drop for ResourceManager {
    fn drop(&mut self) {
        if !self.temp_files.is_empty() {
            info!(
                "自动清理设备 {} 上的 {} 个临时文件",
                self.device_id,
                self.temp_files.len()
            );

            // Drop 中无法传播错误
            let _ = self.cleanup();
        }
    }
}

impl ADB {
    /// 创建资源管理器
    pub fn create_resource_manager(&self, device_id: &str) -> ResourceManager {
        ResourceManager::new(Arc::new(self.clone()), device_id)
    }

    /// 使用资源管理器执行操作，结束后无论成功与否都会清理
    pub fn with_resources<F, T>(&self, device_id: &str, f: F) -> ADBResult<T>
    where
        F: FnOnce(&mut ResourceManager) -> ADBResult<T>,
    {
        let mut manager = self.create_resource_manager(device_id);
        let result = f(&mut manager);

        if let Err(e) = manager.cleanup() {
            warn!("清理设备临时文件失败: {}", e);
        }
        debug!("资源管理操作耗时 {:?}", manager.elapsed());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ADBConfigBuilder;

    #[test]
    fn temp_files_live_under_device_tmp_dir() {
        let config = ADBConfigBuilder::default()
            .path("/nonexistent/adb")
            .device_tmp_dir("/data/local/tmp")
            .build();
        let adb = ADB::new(Some(config));
        let mut manager = adb.create_resource_manager("");

        let first = manager.temp_file("screenshot", ".png");
        assert!(first.starts_with("/data/local/tmp/screenshot_"));
        assert!(first.ends_with(".png"));

        // 清理失败也会清空跟踪列表，再次清理无需执行命令
        assert!(manager.cleanup().is_err());
        assert!(manager.cleanup().is_ok());
    }
}
