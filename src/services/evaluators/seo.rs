//! 搜索可见性指标

use crate::infrastructure::MarkupQuery;
use crate::models::{round2, FacetScores};
use crate::services::evaluators::design::HEADING_TAGS;

fn presence(found: bool) -> f64 {
    if found {
        10.0
    } else {
        0.0
    }
}

pub fn title(doc: &impl MarkupQuery) -> f64 {
    presence(doc.has_element(&["title"]))
}

pub fn meta_description(doc: &impl MarkupQuery) -> f64 {
    presence(doc.has_element_with_attribute("meta", "name", "description"))
}

/// 每个标题元素 2 分，最多 10 分
pub fn headings(doc: &impl MarkupQuery) -> f64 {
    (doc.count_elements(&HEADING_TAGS) as f64 * 2.0).min(10.0)
}

/// 带非空 alt 的图片占比 × 10；没有图片时记满分
pub fn img_alt(doc: &impl MarkupQuery) -> f64 {
    let alts = doc.attribute_values("img", "alt");
    if alts.is_empty() {
        return 10.0;
    }
    let with_alt = alts
        .iter()
        .filter(|alt| alt.as_deref().is_some_and(|a| !a.is_empty()))
        .count();
    round2(with_alt as f64 / alts.len() as f64 * 10.0)
}

pub fn canonical(doc: &impl MarkupQuery) -> f64 {
    presence(doc.has_element_with_attribute("link", "rel", "canonical"))
}

pub fn evaluate(doc: &impl MarkupQuery) -> FacetScores {
    let mut scores = FacetScores::new();
    scores.insert("title", title(doc));
    scores.insert("meta_description", meta_description(doc));
    scores.insert("headings", headings(doc));
    scores.insert("img_alt", img_alt(doc));
    scores.insert("canonical", canonical(doc));
    scores
}
