// Flash filesystem access: lexical path handling, globbing, listings and the storage capability
pub mod listing;
pub mod path;
pub mod pattern;
pub mod storage;

pub use path::{resolve, split_path};
pub use pattern::matches;
pub use storage::{FileStat, Storage};
