pub mod merge;
pub mod mime;
pub mod unique;

pub use merge::merge_deep;
pub use unique::{unique_name, unique_token};
