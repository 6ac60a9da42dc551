pub mod fetch;
pub mod loaders;
pub mod report;
pub mod score;
pub mod target;

pub use fetch::FetchResult;
pub use loaders::{load_targets, TargetList};
pub use report::{render_json, BatchReport, SiteOutcome, SiteReport, SiteScores};
pub use score::{round2, Category, CategoryScores, FacetScores, SiteMetrics};
pub use target::normalize_target;
