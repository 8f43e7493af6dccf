//! Submit a comment on a post

use anyhow::Result;

use crate::content::CommentForm;
use crate::storage::Storage;
use crate::Blog;

pub async fn run<S: Storage>(blog: &Blog<S>, post_id: u64, form: CommentForm) -> Result<()> {
    let comment = blog.submit_comment(post_id, form).await?;
    tracing::debug!("Stored comment {} on post {}", comment.id, post_id);

    let count = blog.comments().count_for(post_id)?;
    println!(
        "Comment posted on post {} ({} comments now).",
        post_id, count
    );
    Ok(())
}
