//! File scanner: two entry points, tree scan and flat find, sharing the same
//! exclusion-pruning walk.

mod flat;
mod tree;

pub use flat::find_files;
pub use tree::scan_tree;
