//! Post detail: the post, its comments and related posts

use crate::content::{Comment, CommentMap, Post};
use crate::error::{BlogError, Result};

/// Everything shown on a post's page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post: Post,
    pub comment_count: usize,
    /// Newest first
    pub comments: Vec<Comment>,
    pub related: Vec<Post>,
}

impl PostDetail {
    /// Resolve post `id` out of `posts`
    pub fn resolve(
        posts: &[Post],
        comments: &CommentMap,
        id: u64,
        related_limit: usize,
    ) -> Result<Self> {
        let post = posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(BlogError::PostNotFound(id))?;

        let mut post_comments = comments.get(id).to_vec();
        post_comments.sort_by(|a, b| b.date.cmp(&a.date));

        let related = related_posts(posts, &post, related_limit);

        Ok(Self {
            comment_count: post_comments.len(),
            comments: post_comments,
            related,
            post,
        })
    }
}

/// Other posts in the same category, in stored order
pub fn related_posts(posts: &[Post], current: &Post, limit: usize) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;
    use chrono::{Local, NaiveDate, TimeZone};

    fn post(id: u64, category: Category) -> Post {
        let mut post = Post::new(
            &format!("Post {}", id),
            "content",
            category,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        post.id = id;
        post
    }

    #[test]
    fn test_resolve_with_related_and_comments() {
        let posts = vec![
            post(1, Category::Ctf),
            post(2, Category::Ctf),
            post(3, Category::Linux),
            post(4, Category::Ctf),
            post(5, Category::Ctf),
            post(6, Category::Ctf),
        ];

        let mut comments = CommentMap::new();
        for (id, hour) in [(1, 8), (2, 20), (3, 12)] {
            comments.push(
                1,
                Comment {
                    id,
                    author: "reader".to_string(),
                    email: None,
                    content: "hi".to_string(),
                    date: Local.with_ymd_and_hms(2024, 6, 2, hour, 0, 0).unwrap(),
                },
            );
        }

        let detail = PostDetail::resolve(&posts, &comments, 1, 3).unwrap();
        assert_eq!(detail.post.id, 1);
        assert_eq!(detail.comment_count, 3);
        assert_eq!(
            detail.comments.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
        assert_eq!(
            detail.related.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 4, 5]
        );
    }

    #[test]
    fn test_resolve_missing_post() {
        let posts = vec![post(1, Category::Ctf)];
        let err = PostDetail::resolve(&posts, &CommentMap::new(), 9, 3).unwrap_err();
        assert!(matches!(err, BlogError::PostNotFound(9)));
    }

    #[test]
    fn test_no_related_posts() {
        let posts = vec![post(1, Category::Ctf), post(2, Category::Linux)];
        assert!(related_posts(&posts, &posts[0], 3).is_empty());
    }
}
