//! Content module - posts, comments, settings and the stores that persist them

mod comment;
mod comments;
mod post;
pub mod seed;
mod settings;
mod store;

pub use comment::{Comment, CommentForm, CommentMap};
pub use comments::{CommentEntry, CommentStore, UNKNOWN_POST_TITLE};
pub use post::{default_image_url, Category, Post};
pub use seed::{BundledSeed, SeedSource};
pub use settings::{Settings, SettingsStore, Theme};
pub use store::{next_id, ContentStore};
