//! Admin panel - post management, comment moderation, settings and password
//!
//! The panel can only be opened with an admin [`Session`]. Destructive
//! operations ask a [`Confirm`] implementation first and leave everything
//! untouched when it declines.

mod stats;

pub use stats::DashboardStats;

use chrono::Local;

use crate::config::SiteConfig;
use crate::content::{
    default_image_url, next_id, Category, CommentEntry, ContentStore, Post, Settings,
    SettingsStore,
};
use crate::error::{BlogError, Result};
use crate::session::{Session, SessionStore};
use crate::storage::{Keys, Storage};

/// Asks the user whether a destructive action should go ahead
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Input of the create/edit post form
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub category: Category,
    /// `None` keeps the current tags when editing
    pub tags: Option<Vec<String>>,
    /// `None` keeps the current image when editing
    pub image: Option<String>,
}

impl PostForm {
    /// Prefill a form from an existing post
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            category: post.category,
            tags: None,
            image: None,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(BlogError::validation("Title and content must not be empty"));
        }
        Ok(())
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|i| !i.is_empty())
    }
}

/// Admin operations over the stores
pub struct AdminPanel<'a, S: Storage + ?Sized> {
    storage: &'a S,
    keys: &'a Keys,
    config: &'a SiteConfig,
}

impl<'a, S: Storage + ?Sized> AdminPanel<'a, S> {
    /// Open the panel; fails unless `session` belongs to an admin
    pub fn open(
        session: &Session,
        storage: &'a S,
        keys: &'a Keys,
        config: &'a SiteConfig,
    ) -> Result<Self> {
        if !session.is_admin {
            tracing::warn!("Admin panel requested without an admin session");
            return Err(BlogError::Unauthorized);
        }

        Ok(Self {
            storage,
            keys,
            config,
        })
    }

    fn content(&self) -> ContentStore<'a, S> {
        ContentStore::new(self.storage, self.keys)
    }

    fn sessions(&self) -> SessionStore<'a, S> {
        SessionStore::new(self.storage, self.keys, self.config)
    }

    fn settings_store(&self) -> SettingsStore<'a, S> {
        SettingsStore::new(self.storage, self.keys, &self.config.default_settings)
    }

    /// All stored posts, in stored order
    pub fn posts(&self) -> Result<Vec<Post>> {
        self.content().posts()
    }

    /// Create a post dated today
    pub fn create(&self, form: PostForm) -> Result<Post> {
        form.validate()?;

        let content = self.content();
        let id = next_id(&content.posts()?)?;

        let mut post = Post::new(
            form.title.trim(),
            &form.content,
            form.category,
            Local::now().date_naive(),
        );
        post.id = id;
        post.image = form
            .image()
            .map(str::to_string)
            .unwrap_or_else(|| default_image_url(id));
        post.tags = form.tags.clone().unwrap_or_default();

        content.upsert(post)
    }

    /// Change title, content and category of a post (and optionally its
    /// tags and image); date and id stay
    pub fn edit(&self, id: u64, form: PostForm) -> Result<Post> {
        form.validate()?;

        let content = self.content();
        let mut post = content.find_by_id(id)?.ok_or(BlogError::PostNotFound(id))?;

        post.title = form.title.trim().to_string();
        post.content = form.content.clone();
        post.category = form.category;
        if let Some(tags) = form.tags.clone() {
            post.tags = tags;
        }
        if let Some(image) = form.image() {
            post.image = image.to_string();
        }

        content.upsert(post)
    }

    /// Delete a post and its comments after confirmation
    pub fn delete(&self, id: u64, confirm: &mut impl Confirm) -> Result<()> {
        let content = self.content();
        let post = content.find_by_id(id)?.ok_or(BlogError::PostNotFound(id))?;

        let prompt = format!(
            "Delete post {} \"{}\"? This cannot be undone.",
            post.id, post.title
        );
        if !confirm.confirm(&prompt) {
            return Err(BlogError::Cancelled);
        }

        content.remove(id)?;
        Ok(())
    }

    /// Every comment with its post title, newest first
    pub fn comments(&self) -> Result<Vec<CommentEntry>> {
        let content = self.content();
        content.comments().all_with_titles(&content.posts()?)
    }

    /// Delete one comment after confirmation
    pub fn delete_comment(
        &self,
        post_id: u64,
        comment_id: i64,
        confirm: &mut impl Confirm,
    ) -> Result<()> {
        let comments = self.content().comments();
        let exists = comments
            .load_map()?
            .get(post_id)
            .iter()
            .any(|c| c.id == comment_id);
        if !exists {
            return Err(BlogError::CommentNotFound {
                post_id,
                comment_id,
            });
        }

        if !confirm.confirm("Delete this comment?") {
            return Err(BlogError::Cancelled);
        }

        comments.remove_one(post_id, comment_id)?;
        Ok(())
    }

    /// Current settings
    pub fn settings(&self) -> Result<Settings> {
        self.settings_store().load()
    }

    /// Overwrite the settings record
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.settings_store().save(settings)
    }

    /// Replace the admin password
    ///
    /// The current password must match, the new one must be typed twice and
    /// be at least `min_password_length` characters.
    pub fn change_password(&self, current: &str, new: &str, confirmation: &str) -> Result<()> {
        let sessions = self.sessions();

        if current != sessions.current_password()? {
            return Err(BlogError::validation("Current password is incorrect"));
        }
        if new != confirmation {
            return Err(BlogError::validation("The new passwords do not match"));
        }
        if new.chars().count() < self.config.min_password_length {
            return Err(BlogError::validation(format!(
                "Password must be at least {} characters",
                self.config.min_password_length
            )));
        }

        sessions.set_password(new)
    }

    /// Dashboard numbers
    pub fn stats(&self) -> Result<DashboardStats> {
        let content = self.content();
        let posts = content.posts()?;
        let comments = content.comments().load_map()?;
        Ok(DashboardStats::compute(&posts, &comments))
    }

    /// Log out after confirmation
    pub fn logout(self, confirm: &mut impl Confirm) -> Result<()> {
        if !confirm.confirm("Log out of the admin panel?") {
            return Err(BlogError::Cancelled);
        }
        self.sessions().logout()
    }
}
