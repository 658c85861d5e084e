use thiserror::Error;

/// ADB 操作相关的错误类型
#[derive(Debug, Error)]
pub enum ADBError {
    /// ADB 命令执行错误
    #[error("ADB 命令错误: {0}")]
    CommandError(String),

    /// 设备通信错误
    #[error("设备通信错误: {0}")]
    DeviceError(String),

    /// 文件操作错误
    #[error("文件操作错误: {0}")]
    FileError(String),

    /// 找不到 ADB 可执行文件
    #[error("找不到 ADB: {0}")]
    BridgeNotFound(String),

    /// 设备不存在
    #[error("设备不存在: {0}")]
    DeviceNotFound(String),

    /// 截图名称无法用作文件名
    #[error("无效的截图名称: {0}")]
    InvalidName(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),
}

impl ADBError {
    /// 启动阶段的致命错误：进程应以非零状态退出
    pub fn is_fatal(&self) -> bool {
        matches!(self, ADBError::BridgeNotFound(_) | ADBError::DeviceNotFound(_))
    }
}

// 为标准错误类型实现 From trait，简化错误处理
impl From<std::io::Error> for ADBError {
    fn from(error: std::io::Error) -> Self {
        ADBError::FileError(error.to_string())
    }
}

impl From<std::num::ParseIntError> for ADBError {
    fn from(error: std::num::ParseIntError) -> Self {
        ADBError::ParseError(format!("数字解析错误: {}", error))
    }
}

impl From<regex::Error> for ADBError {
    fn from(error: regex::Error) -> Self {
        ADBError::ParseError(format!("正则表达式错误: {}", error))
    }
}

pub type ADBResult<T> = Result<T, ADBError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_errors_are_fatal() {
        assert!(ADBError::BridgeNotFound("adb".into()).is_fatal());
        assert!(ADBError::DeviceNotFound("无在线设备".into()).is_fatal());
        assert!(!ADBError::CommandError("pull 失败".into()).is_fatal());
    }

    #[test]
    fn parse_int_error_maps_to_parse_error() {
        let err: ADBError = "abc".parse::<u32>().unwrap_err().into();
        assert!(matches!(err, ADBError::ParseError(_)));
    }
}
