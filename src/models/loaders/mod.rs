pub mod target_loader;

pub use target_loader::{load_targets, parse_target_lines, TargetList};
