//! Admin panel commands
//!
//! Every action opens the panel with the stored session first, so a guest
//! gets a hint to log in instead of a change.

use anyhow::Result;

use super::Prompt;
use crate::admin::{AdminPanel, DashboardStats, PostForm};
use crate::content::{Category, CommentEntry, Post, Settings};
use crate::error::BlogError;
use crate::helpers::{format_datetime, format_day};
use crate::storage::Storage;
use crate::Blog;

/// Field changes for the settings form; `None` keeps the current value
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub site_title: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub profile_desc: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.site_title.is_none()
            && self.hero_title.is_none()
            && self.hero_subtitle.is_none()
            && self.profile_desc.is_none()
    }

    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.site_title {
            settings.site_title = v;
        }
        if let Some(v) = self.hero_title {
            settings.hero_title = v;
        }
        if let Some(v) = self.hero_subtitle {
            settings.hero_subtitle = v;
        }
        if let Some(v) = self.profile_desc {
            settings.profile_desc = v;
        }
    }
}

/// Changes for `admin edit`; unset fields keep the post's values
#[derive(Debug, Default)]
pub struct PostEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
}

async fn open<S: Storage>(blog: &Blog<S>) -> Result<AdminPanel<'_, S>> {
    let session = blog.sessions().load()?;
    match blog.admin(&session).await {
        Ok(panel) => Ok(panel),
        Err(BlogError::Unauthorized) => {
            anyhow::bail!("Admin access required. Run `localblog login` first.")
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the outcome of a confirmed action; a declined prompt is not an error
fn confirmed(result: crate::Result<()>, done: &str) -> Result<()> {
    match result {
        Ok(()) => println!("{}", done),
        Err(BlogError::Cancelled) => println!("Cancelled."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub fn render_stats(stats: &DashboardStats) -> String {
    format!(
        "Posts:      {}\nComments:   {}\nCategories: {}\nLatest:     {}\n",
        stats.total_posts,
        stats.total_comments,
        stats.total_categories,
        stats.latest_post.as_deref().unwrap_or("-")
    )
}

pub fn render_posts(posts: &[Post], date_format: &str) -> String {
    if posts.is_empty() {
        return "No posts.\n".to_string();
    }

    let mut out = String::new();
    for post in posts {
        out.push_str(&format!(
            "  #{:<4} {}  {:<14} {}\n",
            post.id,
            format_day(&post.date, date_format),
            post.category.label(),
            post.title
        ));
    }
    out
}

pub fn render_comments(entries: &[CommentEntry], datetime_format: &str) -> String {
    if entries.is_empty() {
        return "No comments.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let c = &entry.comment;
        out.push_str(&format!(
            "  post #{} \"{}\" / comment {}\n      {} <{}> {}\n      {}\n",
            entry.post_id,
            entry.post_title,
            c.id,
            c.author,
            c.email.as_deref().unwrap_or("-"),
            format_datetime(&c.date, datetime_format),
            c.content
        ));
    }
    out
}

pub async fn stats<S: Storage>(blog: &Blog<S>) -> Result<()> {
    let panel = open(blog).await?;
    print!("{}", render_stats(&panel.stats()?));
    Ok(())
}

pub async fn posts<S: Storage>(blog: &Blog<S>) -> Result<()> {
    let panel = open(blog).await?;
    print!("{}", render_posts(&panel.posts()?, &blog.config.date_format));
    Ok(())
}

pub async fn create<S: Storage>(blog: &Blog<S>, form: PostForm) -> Result<()> {
    let panel = open(blog).await?;
    let post = panel.create(form)?;
    tracing::info!("Created post {}", post.id);
    println!("Created post #{} \"{}\".", post.id, post.title);
    Ok(())
}

pub async fn edit<S: Storage>(blog: &Blog<S>, id: u64, changes: PostEdit) -> Result<()> {
    let panel = open(blog).await?;
    let current = blog
        .content()
        .find_by_id(id)?
        .ok_or(BlogError::PostNotFound(id))?;

    let mut form = PostForm::from_post(&current);
    if let Some(title) = changes.title {
        form.title = title;
    }
    if let Some(content) = changes.content {
        form.content = content;
    }
    if let Some(category) = changes.category {
        form.category = category;
    }
    form.tags = changes.tags;
    form.image = changes.image;

    let post = panel.edit(id, form)?;
    tracing::info!("Updated post {}", post.id);
    println!("Updated post #{} \"{}\".", post.id, post.title);
    Ok(())
}

pub async fn delete<S: Storage>(blog: &Blog<S>, id: u64, assume_yes: bool) -> Result<()> {
    let panel = open(blog).await?;
    confirmed(
        panel.delete(id, &mut Prompt::new(assume_yes)),
        &format!("Deleted post #{}.", id),
    )
}

pub async fn comments<S: Storage>(blog: &Blog<S>) -> Result<()> {
    let panel = open(blog).await?;
    print!(
        "{}",
        render_comments(&panel.comments()?, &blog.config.datetime_format)
    );
    Ok(())
}

pub async fn delete_comment<S: Storage>(
    blog: &Blog<S>,
    post_id: u64,
    comment_id: i64,
    assume_yes: bool,
) -> Result<()> {
    let panel = open(blog).await?;
    confirmed(
        panel.delete_comment(post_id, comment_id, &mut Prompt::new(assume_yes)),
        "Comment deleted.",
    )
}

/// Show the settings form, or save it when any field is given
pub async fn settings<S: Storage>(blog: &Blog<S>, update: SettingsUpdate) -> Result<()> {
    let panel = open(blog).await?;
    let mut settings = panel.settings()?;

    if !update.is_empty() {
        update.apply(&mut settings);
        panel.save_settings(&settings)?;
        println!("Settings saved.");
    }

    println!("site-title:    {}", settings.site_title);
    println!("hero-title:    {}", settings.hero_title);
    println!("hero-subtitle: {}", settings.hero_subtitle);
    println!("profile-desc:  {}", settings.profile_desc);
    Ok(())
}

pub async fn password<S: Storage>(
    blog: &Blog<S>,
    current: &str,
    new: &str,
    confirmation: &str,
) -> Result<()> {
    let panel = open(blog).await?;
    panel.change_password(current, new, confirmation)?;
    tracing::info!("Admin password changed");
    println!("Password updated.");
    Ok(())
}
