use crate::error::{ADBError, ADBResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Android 基准密度（mdpi）
pub const BASELINE_DENSITY: u32 = 160;

static PHYSICAL_SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*Physical size:\s*(\d+)\s*x\s*(\d+)\s*$").unwrap_or_else(|_| {
        // 正则无效时使用永不匹配的模式
        Regex::new(r"^\b$").unwrap()
    })
});

static PHYSICAL_DENSITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*Physical density:\s*(\d+)\s*$")
        .unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
});

/// 解析 `wm size` 输出中的物理分辨率，忽略 Override 行
pub fn parse_physical_size(output: &str) -> ADBResult<(u32, u32)> {
    let caps = PHYSICAL_SIZE_RE.captures(output).ok_or_else(|| {
        ADBError::ParseError(format!("无法解析 wm size 输出: {}", output.trim()))
    })?;

    let width = caps[1].parse::<u32>()?;
    let height = caps[2].parse::<u32>()?;
    Ok((width, height))
}

/// 解析 `wm density` 输出中的物理密度
pub fn parse_physical_density(output: &str) -> ADBResult<u32> {
    let caps = PHYSICAL_DENSITY_RE.captures(output).ok_or_else(|| {
        ADBError::ParseError(format!("无法解析 wm density 输出: {}", output.trim()))
    })?;

    let density = caps[1].parse::<u32>()?;
    if density == 0 {
        return Err(ADBError::ParseError("屏幕密度为 0".to_string()));
    }
    Ok(density)
}

/// 像素转换为 dp，向上取整以与 Android 视口计算保持一致
pub fn px_to_dp(px: u32, density: u32) -> u32 {
    let scaled = u64::from(px) * u64::from(BASELINE_DENSITY);
    let dp = scaled.div_ceil(u64::from(density.max(1)));
    u32::try_from(dp).unwrap_or(u32::MAX)
}

/// 用于展示的绝对路径，失败时原样返回
pub fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
