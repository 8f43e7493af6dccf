//! Bundled seed content
//!
//! The seed file is a read-only JSON array of posts shipped with the site.
//! It is only consulted when the store has no posts yet.

use chrono::Local;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::post::{default_image_url, Category, Post};

/// Errors while fetching seed content
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Somewhere initial posts can be fetched from
#[allow(async_fn_in_trait)]
pub trait SeedSource {
    /// Fetch the full list of seed posts
    async fn fetch(&self) -> Result<Vec<Post>, SeedError>;
}

/// Seed posts read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct BundledSeed {
    path: PathBuf,
}

impl BundledSeed {
    /// Read seed posts from `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the seed file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedSource for BundledSeed {
    async fn fetch(&self) -> Result<Vec<Post>, SeedError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SeedError::Read {
                path: self.path.clone(),
                source,
            })?;

        let posts: Vec<Post> =
            serde_json::from_str(&content).map_err(|source| SeedError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("Fetched {} seed posts from {:?}", posts.len(), self.path);
        Ok(keep_valid_ids(posts))
    }
}

/// Drop seed records whose id is `0` or repeats an earlier record
fn keep_valid_ids(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|post| {
            if post.id == 0 {
                tracing::warn!("Skipping seed post \"{}\" without an id", post.title);
                return false;
            }
            if !seen.insert(post.id) {
                tracing::warn!(
                    "Skipping seed post \"{}\": id {} is already taken",
                    post.title,
                    post.id
                );
                return false;
            }
            true
        })
        .collect()
}

/// The single post used when the seed file cannot be fetched
pub fn fallback_posts() -> Vec<Post> {
    let mut post = Post::new(
        "Sample post",
        "This is a sample post created because the bundled content could not be loaded.",
        Category::Security,
        Local::now().date_naive(),
    );
    post.id = 1;
    post.image = default_image_url(1);
    post.tags = vec!["sample".to_string()];
    vec![post]
}

/// Fetch seed posts, falling back to [`fallback_posts`] on any failure
pub async fn fetch_or_fallback<F: SeedSource>(seed: &F) -> Vec<Post> {
    match seed.fetch().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("{}; using fallback content", e);
            fallback_posts()
        }
    }
}
