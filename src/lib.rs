pub mod cli;
pub mod compact;
pub mod consolidate;
pub mod error;
pub mod group;
pub mod index;
pub mod ops;
pub mod render;
pub mod source;

pub use consolidate::{consolidate, GroupMap};
pub use error::{FoldError, Result};
pub use group::{Builder, LineGroup};
