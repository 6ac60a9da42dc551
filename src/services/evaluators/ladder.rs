//! 阈值阶梯评分

/// 阶梯方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ladder {
    /// 命中第 i 级返回 `(i + 1) * 2`，超出所有阈值返回 10
    Ascending,
    /// 命中第 i 级返回 `10 - i * 2`，超出所有阈值返回 0
    Reverse,
}

/// 按阈值阶梯给数值打分
///
/// 依次扫描阈值，取第一个满足 `value <= threshold` 的位置。
/// 两种方向在"超出所有阈值"时的取值不对称（10 与 0），保持原样。
pub fn rate(value: f64, thresholds: &[f64; 5], ladder: Ladder) -> f64 {
    match thresholds.iter().position(|threshold| value <= *threshold) {
        Some(index) => match ladder {
            Ladder::Ascending => ((index + 1) * 2) as f64,
            Ladder::Reverse => 10.0 - (index * 2) as f64,
        },
        None => match ladder {
            Ladder::Ascending => 10.0,
            Ladder::Reverse => 0.0,
        },
    }
}
