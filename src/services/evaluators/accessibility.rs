//! 无障碍指标

use crate::infrastructure::MarkupQuery;
use crate::models::FacetScores;
use crate::services::evaluators::seo;

/// 根元素带非空 `lang` 属性记 10 分
pub fn lang_attribute(doc: &impl MarkupQuery) -> f64 {
    match doc.root_attribute("lang") {
        Some(lang) if !lang.is_empty() => 10.0,
        _ => 0.0,
    }
}

/// 每个带 `role` 属性的元素 2 分，最多 10 分
pub fn aria_landmarks(doc: &impl MarkupQuery) -> f64 {
    (doc.count_with_attribute("role") as f64 * 2.0).min(10.0)
}

/// 没有表单记 10 分；否则每个"有控件且标签数不少于控件数"的表单加 5 分，最多 10 分
pub fn form_labels(doc: &impl MarkupQuery) -> f64 {
    let forms = doc.forms();
    if forms.is_empty() {
        return 10.0;
    }
    let labelled = forms
        .iter()
        .filter(|form| form.controls > 0 && form.labels >= form.controls)
        .count();
    (labelled as f64 * 5.0).min(10.0)
}

pub fn evaluate(doc: &impl MarkupQuery) -> FacetScores {
    let mut scores = FacetScores::new();
    scores.insert("lang_attribute", lang_attribute(doc));
    scores.insert("aria_landmarks", aria_landmarks(doc));
    scores.insert("form_labels", form_labels(doc));
    scores.insert("alt_texts", seo::img_alt(doc));
    scores.insert("heading_structure", seo::headings(doc));
    scores
}
