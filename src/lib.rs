//! localblog: a personal blog kept in a local key-value store
//!
//! Posts, comments, settings and the admin session all live in one
//! [`storage::Storage`] backend. On first use the post list is seeded from a
//! bundled JSON file; from then on the store is the only source of truth.

pub mod admin;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod session;
pub mod storage;
pub mod views;

pub use error::{BlogError, Result};

use std::path::{Path, PathBuf};

use admin::{AdminPanel, Confirm};
use content::{BundledSeed, Comment, CommentForm, CommentStore, ContentStore, Post, SettingsStore};
use session::{Session, SessionStore};
use storage::{FileStorage, Keys, Storage};
use views::{ListQuery, ListedPost, PostDetail};

/// The main blog application
pub struct Blog<S: Storage = FileStorage> {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Bundled seed file
    pub seed_path: PathBuf,
    /// Storage key names
    pub keys: Keys,
    storage: S,
}

impl Blog<FileStorage> {
    /// Open the blog in a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let storage = FileStorage::new(base_dir.join(&config.storage_file));
        tracing::debug!("Using storage file {:?}", storage.path());

        Ok(Self::with_storage(config, base_dir, storage))
    }
}

impl<S: Storage> Blog<S> {
    /// Build a blog over any storage backend
    pub fn with_storage(config: config::SiteConfig, base_dir: PathBuf, storage: S) -> Self {
        let seed_path = base_dir.join(&config.seed_file);
        let keys = Keys::new(&config.key_prefix);
        Self {
            config,
            base_dir,
            seed_path,
            keys,
            storage,
        }
    }

    /// The storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The bundled seed content
    pub fn seed(&self) -> BundledSeed {
        BundledSeed::new(&self.seed_path)
    }

    /// Post store
    pub fn content(&self) -> ContentStore<'_, S> {
        ContentStore::new(&self.storage, &self.keys)
    }

    /// Comment store
    pub fn comments(&self) -> CommentStore<'_, S> {
        CommentStore::new(&self.storage, &self.keys)
    }

    /// Settings and theme preference
    pub fn settings(&self) -> SettingsStore<'_, S> {
        SettingsStore::new(&self.storage, &self.keys, &self.config.default_settings)
    }

    /// Session flag and credentials
    pub fn sessions(&self) -> SessionStore<'_, S> {
        SessionStore::new(&self.storage, &self.keys, &self.config)
    }

    /// All posts, seeding the store on first use
    pub async fn posts(&self) -> Result<Vec<Post>> {
        self.content().load_all(&self.seed()).await
    }

    /// Posts matching `query`
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<ListedPost>> {
        let posts = self.posts().await?;
        let comments = self.comments().load_map()?;
        Ok(query.apply(posts, &comments))
    }

    /// A post with its comments and related posts
    pub async fn detail(&self, id: u64) -> Result<PostDetail> {
        let posts = self.posts().await?;
        let comments = self.comments().load_map()?;
        PostDetail::resolve(&posts, &comments, id, self.config.related_limit)
    }

    /// Submit the public comment form for post `post_id`
    pub async fn submit_comment(&self, post_id: u64, form: CommentForm) -> Result<Comment> {
        let comment = form.into_comment()?;
        let posts = self.posts().await?;
        if !posts.iter().any(|p| p.id == post_id) {
            return Err(BlogError::PostNotFound(post_id));
        }
        self.comments().append(post_id, comment)
    }

    /// Throw away stored posts, comments and settings after confirmation,
    /// then seed again from the bundled file
    ///
    /// The session, password and theme preference are kept.
    pub async fn reset(&self, confirm: &mut impl Confirm) -> Result<Vec<Post>> {
        if !confirm.confirm(
            "Clear the local store? Posts, comments and settings go back to the bundled content.",
        ) {
            return Err(BlogError::Cancelled);
        }

        self.content().clear()?;
        self.settings().clear()?;
        self.posts().await
    }

    /// Open the admin panel for `session`, seeding the store if needed
    pub async fn admin(&self, session: &Session) -> Result<AdminPanel<'_, S>> {
        let panel = AdminPanel::open(session, &self.storage, &self.keys, &self.config)?;
        self.posts().await?;
        Ok(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::PostForm;
    use crate::content::Category;
    use crate::storage::MemoryStorage;
    use crate::views::SortOrder;
    use std::fs;
    use tempfile::TempDir;

    const SEED: &str = r#"[
        {"id": 1, "title": "Privacy basics", "content": "Protect yourself online", "image": "", "date": "2024-01-15", "comments": 12, "category": "security", "tags": ["privacy"]},
        {"id": 2, "title": "Kali setup", "content": "Tools of the trade", "image": "", "date": "2024-02-01", "comments": 3, "category": "tools", "tags": ["kali"]}
    ]"#;

    fn blog_with_seed(dir: &TempDir) -> Blog<MemoryStorage> {
        let config = config::SiteConfig::default();
        let seed_path = dir.path().join(&config.seed_file);
        fs::create_dir_all(seed_path.parent().unwrap()).unwrap();
        fs::write(&seed_path, SEED).unwrap();
        Blog::with_storage(config, dir.path().to_path_buf(), MemoryStorage::new())
    }

    #[tokio::test]
    async fn test_seed_scenario() {
        let dir = TempDir::new().unwrap();
        let blog = blog_with_seed(&dir);

        let first = blog.posts().await.unwrap();
        assert_eq!(first.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(blog.content().is_seeded().unwrap());

        // With the store populated the seed file is not read again
        fs::remove_file(&blog.seed_path).unwrap();
        let second = blog.posts().await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_comment_flow() {
        let dir = TempDir::new().unwrap();
        let blog = blog_with_seed(&dir);

        for i in 0..3 {
            let form = CommentForm {
                author: format!("reader{}", i),
                email: None,
                content: "Great post".to_string(),
            };
            blog.submit_comment(2, form).await.unwrap();
        }

        let detail = blog.detail(2).await.unwrap();
        assert_eq!(detail.comment_count, 3);

        let popular = blog
            .list(&ListQuery::new().sort(SortOrder::Popular))
            .await
            .unwrap();
        assert_eq!(popular[0].post.id, 2);
        assert_eq!(popular[0].comment_count, 3);
        // The legacy counter in the seed file is ignored
        assert_eq!(popular[1].comment_count, 0);

        let missing = blog
            .submit_comment(
                9,
                CommentForm {
                    author: "x".to_string(),
                    email: None,
                    content: "y".to_string(),
                },
            )
            .await;
        assert!(matches!(missing, Err(BlogError::PostNotFound(9))));
    }

    #[tokio::test]
    async fn test_admin_delete_is_visible_everywhere() {
        let dir = TempDir::new().unwrap();
        let blog = blog_with_seed(&dir);

        assert!(matches!(
            blog.admin(&Session::guest()).await,
            Err(BlogError::Unauthorized)
        ));

        let session = blog.sessions().login("admin", "changeme").unwrap();
        let panel = blog.admin(&session).await.unwrap();
        let created = panel
            .create(PostForm {
                title: "Fresh".to_string(),
                content: "New content".to_string(),
                category: Category::Security,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(created.id, 3);

        panel.delete(1, &mut |_: &str| true).unwrap();

        let security = blog
            .list(&ListQuery::new().category(Category::Security))
            .await
            .unwrap();
        assert_eq!(
            security.iter().map(|l| l.post.id).collect::<Vec<_>>(),
            vec![3]
        );
        assert!(matches!(
            blog.detail(1).await,
            Err(BlogError::PostNotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_reset_restores_bundled_content() {
        let dir = TempDir::new().unwrap();
        let blog = blog_with_seed(&dir);

        let session = blog.sessions().login("admin", "changeme").unwrap();
        let panel = blog.admin(&session).await.unwrap();
        panel.delete(2, &mut |_: &str| true).unwrap();
        let mut settings = panel.settings().unwrap();
        settings.site_title = "Renamed".to_string();
        panel.save_settings(&settings).unwrap();
        blog.submit_comment(
            1,
            CommentForm {
                author: "reader".to_string(),
                email: None,
                content: "hi".to_string(),
            },
        )
        .await
        .unwrap();

        let declined = blog.reset(&mut |_: &str| false).await;
        assert!(matches!(declined, Err(BlogError::Cancelled)));
        assert_eq!(blog.posts().await.unwrap().len(), 1);

        let posts = blog.reset(&mut |_: &str| true).await.unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(blog.comments().total().unwrap(), 0);
        assert_eq!(
            blog.settings().load().unwrap(),
            blog.config.default_settings
        );
        assert!(blog.sessions().load().unwrap().is_admin);
    }
}
