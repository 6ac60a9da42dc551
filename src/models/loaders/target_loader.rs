//! 目标站点列表加载
//!
//! 支持两种格式：
//! - `.toml`：`urls = ["a.com", "https://b.com"]`
//! - 其他扩展名：每行一个 URL，空行和 `#` 开头的行会被忽略

use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::error::{AppResult, FileError};

/// TOML 目标列表
#[derive(Debug, Clone, Deserialize)]
pub struct TargetList {
    pub urls: Vec<String>,
}

/// 从文件加载目标站点列表
pub async fn load_targets(path: &Path) -> AppResult<Vec<String>> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path_str.clone(),
            source,
        })?;

    let targets = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        let list: TargetList =
            toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
                path: path_str.clone(),
                source,
            })?;
        list.urls
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect()
    } else {
        parse_target_lines(&content)
    };

    tracing::info!("从 {} 加载了 {} 个目标站点", path_str, targets.len());
    Ok(targets)
}

/// 按行解析目标列表
pub fn parse_target_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
