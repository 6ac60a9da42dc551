//! 目标站点 URL 规范化

const RECOGNIZED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// 规范化目标 URL
///
/// 去掉首尾空白；若没有 `http://` 或 `https://` 前缀则补上 `https://`。
/// 对已规范化的 URL 再次调用结果不变。
pub fn normalize_target(target: &str) -> String {
    let trimmed = target.trim();
    if has_recognized_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn has_recognized_scheme(url: &str) -> bool {
    RECOGNIZED_SCHEMES.iter().any(|scheme| {
        url.len() >= scheme.len()
            && url.is_char_boundary(scheme.len())
            && url[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}
