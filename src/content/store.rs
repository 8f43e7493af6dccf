//! Content store - the post list, seeded from bundled content on first use

use super::comments::CommentStore;
use super::post::Post;
use super::seed::{fetch_or_fallback, SeedSource};
use crate::error::{BlogError, Result};
use crate::storage::{load_json, store_json, Keys, Storage};

/// Reads and writes the post list
pub struct ContentStore<'a, S: Storage + ?Sized> {
    storage: &'a S,
    keys: &'a Keys,
}

impl<'a, S: Storage + ?Sized> ContentStore<'a, S> {
    /// Create a content store over `storage`
    pub fn new(storage: &'a S, keys: &'a Keys) -> Self {
        Self { storage, keys }
    }

    /// The comment store sharing this storage
    pub fn comments(&self) -> CommentStore<'a, S> {
        CommentStore::new(self.storage, self.keys)
    }

    /// Whether the post list has been written at least once
    pub fn is_seeded(&self) -> Result<bool> {
        Ok(self.storage.contains(&self.keys.posts())?)
    }

    /// All posts, seeding the store from `seed` if it has no post list yet
    ///
    /// The seed is never fetched once a post list exists, even an empty one.
    pub async fn load_all<F: SeedSource>(&self, seed: &F) -> Result<Vec<Post>> {
        if let Some(posts) = load_json::<_, Vec<Post>>(self.storage, &self.keys.posts())? {
            return Ok(posts);
        }

        tracing::info!("No stored posts, seeding from bundled content");
        let posts = fetch_or_fallback(seed).await;
        self.save(&posts)?;
        Ok(posts)
    }

    /// Replace the post list with the bundled content
    ///
    /// Comments of posts missing from the new list are dropped, so a post
    /// created later under a freed id starts without comments.
    pub async fn reseed<F: SeedSource>(&self, seed: &F) -> Result<Vec<Post>> {
        let posts = fetch_or_fallback(seed).await;
        self.save(&posts)?;
        self.comments().prune_orphans(&posts)?;
        tracing::info!("Reseeded store with {} posts", posts.len());
        Ok(posts)
    }

    /// Forget the post list and every comment
    ///
    /// The next [`ContentStore::load_all`] seeds again from bundled content.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(&self.keys.posts())?;
        self.storage.remove(&self.keys.comments())?;
        tracing::info!("Cleared stored posts and comments");
        Ok(())
    }

    /// Posts currently stored, without seeding
    pub fn posts(&self) -> Result<Vec<Post>> {
        Ok(load_json(self.storage, &self.keys.posts())?.unwrap_or_default())
    }

    /// Overwrite the post list
    pub fn save(&self, posts: &[Post]) -> Result<()> {
        store_json(self.storage, &self.keys.posts(), posts)?;
        tracing::debug!("Saved {} posts", posts.len());
        Ok(())
    }

    /// Look up a post by id
    pub fn find_by_id(&self, id: u64) -> Result<Option<Post>> {
        Ok(self.posts()?.into_iter().find(|p| p.id == id))
    }

    /// Insert or replace a post, returning it as stored
    ///
    /// A post with id `0` gets the next free id (largest id + 1, or 1 for
    /// an empty store). A post with a known id replaces it in place.
    pub fn upsert(&self, mut post: Post) -> Result<Post> {
        let mut posts = self.posts()?;

        if post.is_new() {
            post.id = next_id(&posts)?;
            posts.push(post.clone());
            tracing::info!("Created post {}: {}", post.id, post.title);
        } else if let Some(existing) = posts.iter_mut().find(|p| p.id == post.id) {
            *existing = post.clone();
            tracing::info!("Updated post {}: {}", post.id, post.title);
        } else {
            posts.push(post.clone());
            tracing::info!("Inserted post {}: {}", post.id, post.title);
        }

        self.save(&posts)?;
        Ok(post)
    }

    /// Delete a post and all of its comments; returns whether it existed
    pub fn remove(&self, id: u64) -> Result<bool> {
        let mut posts = self.posts()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        let existed = posts.len() != before;
        if existed {
            self.save(&posts)?;
            tracing::info!("Deleted post {}", id);
        }

        self.comments().remove_all(id)?;
        Ok(existed)
    }
}

/// Next free post id (largest id + 1, or 1 when there are no posts)
pub fn next_id(posts: &[Post]) -> Result<u64> {
    match posts.iter().map(|p| p.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(BlogError::IdsExhausted),
    }
}
