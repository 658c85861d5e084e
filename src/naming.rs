//! 截图文件命名规则
//!
//! 文件名格式为 `{label}_{YYYYMMDD_HHMMSS}.png`，其中 label 是用户输入的名称
//! 或按会话计数生成的 `screenshot_001`、`screenshot_002` ...

use crate::error::{ADBError, ADBResult};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// 时间戳格式
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 自动命名的前缀
pub const AUTO_LABEL_PREFIX: &str = "screenshot";

/// 截图文件扩展名
pub const EXTENSION: &str = "png";

/// 一次截图请求的名称来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureName {
    /// 用户提供的名称
    Named(String),
    /// 按计数自动命名
    Auto,
}

impl CaptureName {
    /// 由可选名称构建，空白名称视为自动命名
    pub fn from_option(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => CaptureName::Named(n.to_string()),
            _ => CaptureName::Auto,
        }
    }
}

/// 自动命名标签，计数补零到三位
pub fn auto_label(counter: u32) -> String {
    format!("{}_{:03}", AUTO_LABEL_PREFIX, counter)
}

/// 将非字母数字、`-`、`_` 的字符替换为 `_`
pub fn sanitize_label(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// 组合标签与时间戳得到文件名
pub fn build_filename(label: &str, at: &NaiveDateTime) -> String {
    format!("{}_{}.{}", label, format_timestamp(at), EXTENSION)
}

/// 截图在输出目录中的完整路径
///
/// 标签中不允许出现路径分隔符，生成的文件必须直接位于输出目录下。
pub fn capture_path(output_dir: &Path, label: &str, at: &NaiveDateTime) -> ADBResult<PathBuf> {
    if label.contains(|c: char| c == '/' || c == '\\') {
        return Err(ADBError::InvalidName(format!("名称不能包含路径分隔符: {}", label)));
    }

    let path = output_dir.join(build_filename(label, at));
    if path.parent() != Some(output_dir) {
        return Err(ADBError::InvalidName(format!("名称不能用作文件名: {}", label)));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 12, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn named_capture_path() {
        let path = capture_path(Path::new("shots"), "login", &at(14, 30, 22)).unwrap();
        assert_eq!(path, Path::new("shots").join("login_20231210_143022.png"));
    }

    #[test]
    fn capture_path_stays_in_output_dir() {
        let dir = Path::new("shots");
        for label in ["/tmp/evil", "../escape", "a/b", "..\\win", "/"] {
            let err = capture_path(dir, label, &at(14, 30, 22)).unwrap_err();
            assert!(matches!(err, ADBError::InvalidName(_)), "{}", label);
        }

        // 点号本身只是普通文件名的一部分
        let path = capture_path(dir, "..", &at(14, 30, 22)).unwrap();
        assert_eq!(path, dir.join(".._20231210_143022.png"));
        assert_eq!(
            capture_path(dir, "设置 page", &at(14, 30, 22)).unwrap(),
            dir.join("设置 page_20231210_143022.png")
        );
    }

    #[test]
    fn timestamp_is_zero_padded() {
        assert_eq!(build_filename("home", &at(4, 5, 6)), "home_20231210_040506.png");
    }

    #[test]
    fn auto_labels_are_padded_to_three_digits() {
        assert_eq!(auto_label(1), "screenshot_001");
        assert_eq!(auto_label(42), "screenshot_042");
        assert_eq!(auto_label(1000), "screenshot_1000");
    }

    #[test]
    fn sanitizes_special_characters() {
        assert_eq!(sanitize_label("login screen"), "login_screen");
        assert_eq!(sanitize_label("a/b:c"), "a_b_c");
        assert_eq!(sanitize_label("设置-page_2"), "设置-page_2");
    }

    #[test]
    fn capture_name_from_option() {
        assert_eq!(CaptureName::from_option(None), CaptureName::Auto);
        assert_eq!(CaptureName::from_option(Some("  ")), CaptureName::Auto);
        assert_eq!(
            CaptureName::from_option(Some(" login ")),
            CaptureName::Named("login".to_string())
        );
    }
}
