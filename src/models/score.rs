//! 评分相关的数据结构
//!
//! 所有对外暴露的分数都在 [0, 10] 区间，保留两位小数。

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 保留两位小数
///
/// 按 `f64` 的精确二进制值取最近的两位小数，不先乘 100，
/// 避免乘法误差改变进位方向（如 2.675 实际略小于 2.675，得到 2.67）。
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// 算术平均值并保留两位小数，空序列返回 0
pub fn mean2<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        round2(sum / count as f64)
    }
}

/// 四个固定的评分类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Performance,
    Design,
    Seo,
    Accessibility,
}

impl Category {
    /// 按报告顺序排列的全部类别
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Design,
        Category::Seo,
        Category::Accessibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Design => "design",
            Category::Seo => "seo",
            Category::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个类别下各项指标的得分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetScores(BTreeMap<String, f64>);

impl FacetScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一项指标；分数会被限制在 [0, 10] 并保留两位小数
    pub fn insert(&mut self, facet: impl Into<String>, score: f64) {
        self.0.insert(facet.into(), round2(score.clamp(0.0, 10.0)));
    }

    pub fn get(&self, facet: &str) -> Option<f64> {
        self.0.get(facet).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// 类别得分：各项指标的平均值
    pub fn category_score(&self) -> f64 {
        mean2(self.0.values().copied())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FacetScores {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        let mut scores = FacetScores::new();
        for (facet, score) in iter {
            scores.insert(facet, score);
        }
        scores
    }
}

/// 四个类别的得分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub performance: f64,
    pub design: f64,
    pub seo: f64,
    pub accessibility: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Performance => self.performance,
            Category::Design => self.design,
            Category::Seo => self.seo,
            Category::Accessibility => self.accessibility,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// 总分：四个类别得分的平均值
    pub fn overall(&self) -> f64 {
        mean2(Category::ALL.iter().map(|c| self.get(*c)))
    }
}

/// 单个站点的全部指标明细
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetrics {
    pub performance: FacetScores,
    pub design: FacetScores,
    pub seo: FacetScores,
    pub accessibility: FacetScores,
}

impl SiteMetrics {
    pub fn get(&self, category: Category) -> &FacetScores {
        match category {
            Category::Performance => &self.performance,
            Category::Design => &self.design,
            Category::Seo => &self.seo,
            Category::Accessibility => &self.accessibility,
        }
    }

    pub fn category_scores(&self) -> CategoryScores {
        CategoryScores {
            performance: self.performance.category_score(),
            design: self.design.category_score(),
            seo: self.seo.category_score(),
            accessibility: self.accessibility.category_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(9.2), 9.2);
        assert_eq!(round2(6.666_666), 6.67);
        assert_eq!(round2(3.333_333), 3.33);
        // 2.675 的二进制值略小于 2.675
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);
    }

    #[test]
    fn round2_uses_exact_value_not_scaled_value() {
        // (x * 100).round() 会在这里得到 4.16
        assert_eq!(round2((2.0 + 8.0 + 2.83 + 3.83) / 4.0), 4.17);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean2(Vec::new()), 0.0);
    }

    #[test]
    fn facet_scores_are_clamped() {
        let scores: FacetScores = [("a", 12.0), ("b", -1.0), ("c", 7.456)].into_iter().collect();
        assert_eq!(scores.get("a"), Some(10.0));
        assert_eq!(scores.get("b"), Some(0.0));
        assert_eq!(scores.get("c"), Some(7.46));
    }

    #[test]
    fn overall_is_mean_of_categories() {
        let scores = CategoryScores {
            performance: 8.0,
            design: 7.0,
            seo: 9.2,
            accessibility: 6.2,
        };
        assert_eq!(scores.overall(), 7.6);
    }

    #[test]
    fn overall_rounds_on_exact_mean() {
        let scores = CategoryScores {
            performance: 2.0,
            design: 8.0,
            seo: 2.83,
            accessibility: 3.83,
        };
        assert_eq!(scores.overall(), 4.17);
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Seo).unwrap();
        assert_eq!(json, "\"seo\"");
    }
}
