//! 一次 HTTP GET 的结果

use std::collections::HashMap;
use std::time::Duration;

/// 抓取结果，构造后不再修改
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// 实际请求的 URL
    pub url: String,
    /// HTTP 状态码
    pub status: u16,
    /// 从发出请求到读完响应体的总耗时
    pub elapsed: Duration,
    /// 首字节时间（收到响应头的时刻）
    pub ttfb: Duration,
    /// 解码后的响应体字节数
    pub body_size: usize,
    /// 响应头（键统一为小写）
    headers: HashMap<String, String>,
    /// 响应体文本
    pub body: String,
}

impl FetchResult {
    /// 创建抓取结果；同名响应头的值以 `, ` 合并
    pub fn new<I, K, V>(
        url: impl Into<String>,
        status: u16,
        elapsed: Duration,
        ttfb: Duration,
        headers: I,
        body: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut merged: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let value = value.into();
            merged
                .entry(name.as_ref().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        let body = body.into();
        Self {
            url: url.into(),
            status,
            elapsed,
            ttfb,
            body_size: body.len(),
            headers: merged,
            body,
        }
    }

    /// 覆盖响应体字节数（例如按解压前后的实际字节计）
    pub fn with_body_size(mut self, body_size: usize) -> Self {
        self.body_size = body_size;
        self
    }

    /// 按名称查找响应头，不区分大小写
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// 状态码是否为 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 响应体大小（MB）
    pub fn body_size_mb(&self) -> f64 {
        self.body_size as f64 / 1024.0 / 1024.0
    }
}
