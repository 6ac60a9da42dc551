//! 标记查询能力
//!
//! `MarkupQuery` 是评分函数唯一依赖的文档接口。查询永远不会失败，
//! 找不到元素时返回 0 / `None` / 空列表。

use scraper::{Html, Selector};

/// 单个表单内的控件与标签数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormSummary {
    /// `input` / `select` / `textarea` 数量
    pub controls: usize,
    /// `label` 数量
    pub labels: usize,
}

/// 文档查询接口
pub trait MarkupQuery {
    /// 统计任一给定标签名的元素数量
    fn count_elements(&self, tags: &[&str]) -> usize;

    /// 是否存在任一给定标签名的元素
    fn has_element(&self, tags: &[&str]) -> bool {
        self.count_elements(tags) > 0
    }

    /// 是否存在某个属性等于 `value` 的 `tag` 元素
    ///
    /// `rel` 是以空白分隔的取值列表，只要包含 `value` 即可；其他属性需完全相等。
    fn has_element_with_attribute(&self, tag: &str, attr: &str, value: &str) -> bool;

    /// 携带某个属性的元素数量（任意标签）
    fn count_with_attribute(&self, attr: &str) -> usize;

    /// 根元素上的属性值
    fn root_attribute(&self, attr: &str) -> Option<String>;

    /// 所有 `tag` 元素上 `attr` 属性的取值，未设置时为 `None`
    fn attribute_values(&self, tag: &str, attr: &str) -> Vec<Option<String>>;

    /// 每个表单的控件/标签统计
    fn forms(&self) -> Vec<FormSummary>;

    /// 原始标记中是否出现给定子串
    fn contains_text(&self, needle: &str) -> bool;
}

/// 基于 `scraper` 的 HTML 文档
///
/// 内部的 `Html` 不是 `Send`，只应在同步的评分阶段创建和使用。
pub struct HtmlDocument {
    html: Html,
    raw: String,
}

impl HtmlDocument {
    pub fn parse(raw: &str) -> Self {
        Self {
            html: Html::parse_document(raw),
            raw: raw.to_string(),
        }
    }
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("无效的选择器 '{}': {:?}", css, e);
            None
        }
    }
}

fn attribute_matches(attr: &str, actual: &str, expected: &str) -> bool {
    if attr.eq_ignore_ascii_case("rel") {
        actual.split_ascii_whitespace().any(|token| token == expected)
    } else {
        actual == expected
    }
}

impl MarkupQuery for HtmlDocument {
    fn count_elements(&self, tags: &[&str]) -> usize {
        if tags.is_empty() {
            return 0;
        }
        selector(&tags.join(", "))
            .map(|sel| self.html.select(&sel).count())
            .unwrap_or(0)
    }

    fn has_element_with_attribute(&self, tag: &str, attr: &str, value: &str) -> bool {
        let Some(sel) = selector(tag) else {
            return false;
        };
        self.html.select(&sel).any(|element| {
            element
                .value()
                .attr(attr)
                .is_some_and(|actual| attribute_matches(attr, actual, value))
        })
    }

    fn count_with_attribute(&self, attr: &str) -> usize {
        selector(&format!("[{}]", attr))
            .map(|sel| self.html.select(&sel).count())
            .unwrap_or(0)
    }

    fn root_attribute(&self, attr: &str) -> Option<String> {
        self.html
            .root_element()
            .value()
            .attr(attr)
            .map(str::to_string)
    }

    fn attribute_values(&self, tag: &str, attr: &str) -> Vec<Option<String>> {
        let Some(sel) = selector(tag) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .map(|element| element.value().attr(attr).map(str::to_string))
            .collect()
    }

    fn forms(&self) -> Vec<FormSummary> {
        let (Some(form_sel), Some(control_sel), Some(label_sel)) = (
            selector("form"),
            selector("input, select, textarea"),
            selector("label"),
        ) else {
            return Vec::new();
        };
        self.html
            .select(&form_sel)
            .map(|form| FormSummary {
                controls: form.select(&control_sel).count(),
                labels: form.select(&label_sel).count(),
            })
            .collect()
    }

    fn contains_text(&self, needle: &str) -> bool {
        self.raw.contains(needle)
    }
}
