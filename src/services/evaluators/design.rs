//! 设计类指标
//!
//! 只能从原始标记中推断，不做真实的渲染或布局测量。

use crate::infrastructure::MarkupQuery;
use crate::models::FacetScores;

pub(crate) const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const LANDMARK_TAGS: [&str; 4] = ["header", "nav", "main", "footer"];

fn points(condition: bool, value: f64) -> f64 {
    if condition {
        value
    } else {
        0.0
    }
}

pub fn color_contrast(doc: &impl MarkupQuery) -> f64 {
    points(doc.has_element(&["style", "link"]), 5.0) + points(doc.contains_text("color"), 5.0)
}

pub fn typography(doc: &impl MarkupQuery) -> f64 {
    points(doc.has_element(&HEADING_TAGS), 5.0) + points(doc.has_element(&["p", "span", "div"]), 5.0)
}

/// 每种语义化布局标签 2.5 分
pub fn layout(doc: &impl MarkupQuery) -> f64 {
    LANDMARK_TAGS
        .iter()
        .filter(|tag| doc.has_element(&[**tag]))
        .count() as f64
        * 2.5
}

pub fn responsive_design(doc: &impl MarkupQuery) -> f64 {
    points(doc.has_element_with_attribute("meta", "name", "viewport"), 5.0)
        + points(doc.contains_text("@media"), 5.0)
}

pub fn visual_hierarchy(doc: &impl MarkupQuery) -> f64 {
    points(doc.has_element(&HEADING_TAGS), 5.0) + points(doc.has_element(&["ul", "ol"]), 5.0)
}

pub fn evaluate(doc: &impl MarkupQuery) -> FacetScores {
    let mut scores = FacetScores::new();
    scores.insert("color_contrast", color_contrast(doc));
    scores.insert("typography", typography(doc));
    scores.insert("layout", layout(doc));
    scores.insert("responsive_design", responsive_design(doc));
    scores.insert("visual_hierarchy", visual_hierarchy(doc));
    scores
}
