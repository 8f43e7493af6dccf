//! Show a single post

use anyhow::Result;

use crate::error::BlogError;
use crate::helpers::{format_datetime, format_day, relative_date};
use crate::storage::Storage;
use crate::views::PostDetail;
use crate::Blog;

/// Render a post page as text
pub fn render<S: Storage>(blog: &Blog<S>, detail: &PostDetail) -> String {
    let post = &detail.post;
    let mut out = String::new();

    out.push_str(&format!("{}\n", post.title));
    out.push_str(&format!(
        "{} | {} | {} comments\n",
        format_day(&post.date, &blog.config.date_format),
        post.category.label(),
        detail.comment_count
    ));
    if !post.image.is_empty() {
        out.push_str(&format!("Image: {}\n", post.image));
    }
    out.push('\n');
    out.push_str(&post.content);
    out.push_str("\n\n");

    if !post.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n\n", post.tags.join(", ")));
    }

    out.push_str("Related posts:\n");
    if detail.related.is_empty() {
        out.push_str("  (none)\n");
    }
    for related in &detail.related {
        out.push_str(&format!(
            "  #{} {} ({})\n",
            related.id,
            related.title,
            format_day(&related.date, &blog.config.date_format)
        ));
    }

    out.push_str(&format!("\nComments ({}):\n", detail.comment_count));
    if detail.comments.is_empty() {
        out.push_str("  No comments yet. Be the first to comment!\n");
    }
    for comment in &detail.comments {
        out.push_str(&format!(
            "  [{}] {} - {} ({})\n      {}\n",
            comment.id,
            comment.author,
            format_datetime(&comment.date, &blog.config.datetime_format),
            relative_date(&comment.date),
            comment.content
        ));
    }

    out
}

/// Render the panel shown for an unknown post
pub fn render_not_found(id: u64) -> String {
    format!(
        "Post not found\nPost {} does not exist or has been deleted.\nRun `localblog list` to return to the post list.\n",
        id
    )
}

/// Run the show command
pub async fn run<S: Storage>(blog: &Blog<S>, id: u64) -> Result<()> {
    match blog.detail(id).await {
        Ok(detail) => print!("{}", render(blog, &detail)),
        Err(BlogError::PostNotFound(id)) => print!("{}", render_not_found(id)),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{Category, CommentMap, Post};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_render_post_page() {
        let blog = Blog::with_storage(
            SiteConfig::default(),
            PathBuf::from("."),
            MemoryStorage::new(),
        );

        let mut post = Post::new(
            "Reverse shells",
            "Catching a shell with netcat.",
            Category::Ctf,
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        );
        post.id = 4;
        post.tags = vec!["nc".to_string(), "shell".to_string()];

        let detail = PostDetail::resolve(&[post], &CommentMap::new(), 4, 3).unwrap();
        let out = render(&blog, &detail);

        assert!(out.starts_with("Reverse shells\n2024-03-09 | CTF | 0 comments\n"));
        assert!(out.contains("Tags: nc, shell"));
        assert!(out.contains("No comments yet"));
        assert!(render_not_found(4).contains("Post 4 does not exist"));
    }
}
