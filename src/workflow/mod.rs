pub mod site_analyzer;

pub use site_analyzer::SiteAnalyzer;
