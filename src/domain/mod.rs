//! Domain logic - pure rules for tags, windows and changelog records,
//! independent of how history is read

pub mod catalog;
pub mod changelog;
pub mod commit;
pub mod tag;
pub mod window;

pub use catalog::TagCatalog;
pub use changelog::{Changelog, ChangelogBuilder, ChangelogEntry};
pub use commit::CommitRecord;
pub use tag::{Tag, TagFilter};
pub use window::{build_windows, Window};
