//! Dashboard statistics

use std::collections::HashSet;

use crate::content::{CommentMap, Post};

/// Numbers shown at the top of the admin panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_posts: usize,
    pub total_comments: usize,
    /// Distinct categories in use
    pub total_categories: usize,
    /// Title of the most recent post
    pub latest_post: Option<String>,
}

impl DashboardStats {
    pub fn compute(posts: &[Post], comments: &CommentMap) -> Self {
        let categories: HashSet<_> = posts.iter().map(|p| p.category).collect();

        // First post wins on equal dates
        let latest_post = posts
            .iter()
            .reduce(|latest, p| if p.date > latest.date { p } else { latest })
            .map(|p| p.title.clone());

        Self {
            total_posts: posts.len(),
            total_comments: comments.total(),
            total_categories: categories.len(),
            latest_post,
        }
    }
}
