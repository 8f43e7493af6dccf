//! Initialize a new blog and seed its store

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::Prompt;
use crate::error::BlogError;
use crate::storage::Storage;
use crate::Blog;

/// Initialize a new blog in the given directory
///
/// Existing files are left alone so the command can be re-run safely.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("data"))?;

    let config_content = r#"# localblog configuration

# Site
title: localblog
author: John Doe

# Storage
storage_file: .localblog/storage.json
seed_file: data/posts.json
key_prefix: blog

# Admin
admin_username: admin
default_password: changeme
min_password_length: 6

# Views
related_limit: 3
excerpt_length: 120

# Date / Time format
date_format: YYYY-MM-DD
datetime_format: YYYY-MM-DD HH:mm

# Shown until the settings form is saved
default_settings:
  siteTitle: localblog
  heroTitle: Welcome to my tech blog
  heroSubtitle: Security learner | Notes on growth and knowledge
  profileDesc: Curious about security, writing down what I learn along the way.
"#;

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, config_content)?;
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_posts = format!(
        r#"[
  {{
    "id": 1,
    "title": "Hello World",
    "content": "Welcome to localblog! This is your very first post. Edit data/posts.json before the first run, or manage posts with `localblog admin`.",
    "image": "https://picsum.photos/600/400?random=1",
    "date": "{}",
    "category": "uncategorized",
    "tags": ["welcome"]
  }}
]
"#,
        today
    );

    let seed_path = target_dir.join("data/posts.json");
    if !seed_path.exists() {
        fs::write(&seed_path, sample_posts)?;
    }

    Ok(())
}

/// Seed the store from the bundled file
///
/// Without `force` an existing post list is kept untouched.
pub async fn seed<S: Storage>(blog: &Blog<S>, force: bool) -> Result<usize> {
    let content = blog.content();

    let posts = if force {
        content.reseed(&blog.seed()).await?
    } else {
        if content.is_seeded()? {
            tracing::info!("Store already has posts, keeping them (use --force to reseed)");
        }
        content.load_all(&blog.seed()).await?
    };

    Ok(posts.len())
}

/// Clear the local store and reload the bundled content
pub async fn reset<S: Storage>(blog: &Blog<S>, assume_yes: bool) -> Result<()> {
    match blog.reset(&mut Prompt::new(assume_yes)).await {
        Ok(posts) => println!("Local store cleared, {} posts loaded.", posts.len()),
        Err(BlogError::Cancelled) => println!("Cancelled."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Category, Comment, Post};
    use crate::storage::FileStorage;
    use chrono::Local;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_then_seed() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(dir.path().join("_config.yml").exists());

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(seed(&blog, false).await.unwrap(), 1);
        assert!(dir.path().join(".localblog/storage.json").exists());

        let posts = blog.content().posts().unwrap();
        assert_eq!(posts[0].title, "Hello World");
    }

    #[tokio::test]
    async fn test_force_reseed_discards_edits() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        let blog: Blog<FileStorage> = Blog::new(dir.path()).unwrap();
        seed(&blog, false).await.unwrap();

        let content = blog.content();
        let mut post = content.find_by_id(1).unwrap().unwrap();
        post.title = "Edited".to_string();
        content.upsert(post).unwrap();

        seed(&blog, false).await.unwrap();
        assert_eq!(content.find_by_id(1).unwrap().unwrap().title, "Edited");

        seed(&blog, true).await.unwrap();
        assert_eq!(content.find_by_id(1).unwrap().unwrap().title, "Hello World");
    }

    #[tokio::test]
    async fn test_force_reseed_drops_stale_comments() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        let blog: Blog<FileStorage> = Blog::new(dir.path()).unwrap();
        seed(&blog, false).await.unwrap();

        let content = blog.content();
        let today = Local::now().date_naive();
        let extra = content
            .upsert(Post::new("Local", "only here", Category::Linux, today))
            .unwrap();
        blog.comments()
            .append(extra.id, Comment::new("reader", "old comment", None))
            .unwrap();

        seed(&blog, true).await.unwrap();

        let fresh = content
            .upsert(Post::new("Fresh", "new", Category::Tools, today))
            .unwrap();
        assert_eq!(fresh.id, extra.id);
        assert_eq!(blog.comments().count_for(fresh.id).unwrap(), 0);
        assert_eq!(blog.comments().total().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reset_with_yes() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        let blog: Blog<FileStorage> = Blog::new(dir.path()).unwrap();
        seed(&blog, false).await.unwrap();
        blog.content().remove(1).unwrap();
        assert!(blog.content().posts().unwrap().is_empty());

        reset(&blog, true).await.unwrap();
        assert_eq!(blog.content().posts().unwrap()[0].title, "Hello World");
    }
}
