//! Read-only views over the content store

mod detail;
mod list;

pub use detail::{related_posts, PostDetail};
pub use list::{ListQuery, ListedPost, SortOrder};
