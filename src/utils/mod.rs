pub mod logging;

pub use logging::{log_startup, log_targets_loaded, print_final_stats, truncate_text};
