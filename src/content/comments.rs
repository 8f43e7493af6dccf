//! Comment store - per-post comment lists kept apart from the posts

use super::comment::{Comment, CommentMap};
use super::post::Post;
use crate::error::Result;
use crate::storage::{load_json, store_json, Keys, Storage};

/// Title shown for comments whose post no longer exists
pub const UNKNOWN_POST_TITLE: &str = "Unknown post";

/// A comment together with the post it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    pub post_id: u64,
    pub post_title: String,
    pub comment: Comment,
}

/// Reads and writes the comment map
pub struct CommentStore<'a, S: Storage + ?Sized> {
    storage: &'a S,
    keys: &'a Keys,
}

impl<'a, S: Storage + ?Sized> CommentStore<'a, S> {
    /// Create a comment store over `storage`
    pub fn new(storage: &'a S, keys: &'a Keys) -> Self {
        Self { storage, keys }
    }

    /// Load the whole comment map
    pub fn load_map(&self) -> Result<CommentMap> {
        Ok(load_json(self.storage, &self.keys.comments())?.unwrap_or_default())
    }

    fn save_map(&self, map: &CommentMap) -> Result<()> {
        store_json(self.storage, &self.keys.comments(), map)
    }

    /// Comments of a post, newest first
    pub fn list_for(&self, post_id: u64) -> Result<Vec<Comment>> {
        let map = self.load_map()?;
        Ok(newest_first(map.get(post_id).to_vec()))
    }

    /// Number of comments on a post
    pub fn count_for(&self, post_id: u64) -> Result<usize> {
        Ok(self.load_map()?.count(post_id))
    }

    /// Number of comments on all posts
    pub fn total(&self) -> Result<usize> {
        Ok(self.load_map()?.total())
    }

    /// Append a comment to a post, returning it as stored
    pub fn append(&self, post_id: u64, comment: Comment) -> Result<Comment> {
        let mut map = self.load_map()?;
        let stored = map.push(post_id, comment);
        self.save_map(&map)?;
        tracing::info!(
            "Added comment {} by {} to post {}",
            stored.id,
            stored.author,
            post_id
        );
        Ok(stored)
    }

    /// Remove one comment; returns whether it existed
    pub fn remove_one(&self, post_id: u64, comment_id: i64) -> Result<bool> {
        let mut map = self.load_map()?;
        if !map.remove_one(post_id, comment_id) {
            return Ok(false);
        }
        self.save_map(&map)?;
        tracing::info!("Removed comment {} from post {}", comment_id, post_id);
        Ok(true)
    }

    /// Remove every comment of a post; returns whether any existed
    pub fn remove_all(&self, post_id: u64) -> Result<bool> {
        let mut map = self.load_map()?;
        if !map.remove_all(post_id) {
            return Ok(false);
        }
        self.save_map(&map)?;
        tracing::debug!("Removed all comments of post {}", post_id);
        Ok(true)
    }

    /// Drop the comments of every post not in `posts`; returns how many
    /// comments went away
    pub fn prune_orphans(&self, posts: &[Post]) -> Result<usize> {
        let mut map = self.load_map()?;
        let dropped = map.retain_posts(|post_id| posts.iter().any(|p| p.id == post_id));
        if dropped > 0 {
            self.save_map(&map)?;
            tracing::info!("Dropped {} comments of posts that no longer exist", dropped);
        }
        Ok(dropped)
    }

    /// Every comment, tagged with its post title, newest first
    pub fn all_with_titles(&self, posts: &[Post]) -> Result<Vec<CommentEntry>> {
        let map = self.load_map()?;

        let mut entries: Vec<CommentEntry> = map
            .iter()
            .flat_map(|(post_id, comments)| {
                let post_title = posts
                    .iter()
                    .find(|p| p.id == post_id)
                    .map(|p| p.title.clone())
                    .unwrap_or_else(|| UNKNOWN_POST_TITLE.to_string());

                comments.iter().map(move |comment| CommentEntry {
                    post_id,
                    post_title: post_title.clone(),
                    comment: comment.clone(),
                })
            })
            .collect();

        entries.sort_by(|a, b| b.comment.date.cmp(&a.comment.date));
        Ok(entries)
    }
}

fn newest_first(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| b.date.cmp(&a.date));
    comments
}
