//! Post listing: category filter, search and sort

use std::str::FromStr;

use crate::content::{Category, CommentMap, Post};
use crate::error::BlogError;

/// Order of listed posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Date, newest first
    #[default]
    Newest,
    /// Date, oldest first
    Oldest,
    /// Comment count, highest first
    Popular,
}

impl FromStr for SortOrder {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "new" | "-date" => Ok(SortOrder::Newest),
            "oldest" | "old" | "date" => Ok(SortOrder::Oldest),
            "popular" | "comments" => Ok(SortOrder::Popular),
            _ => Err(BlogError::validation(format!(
                "Unknown sort order: {}. Available: newest, oldest, popular",
                s
            ))),
        }
    }
}

/// A post as shown in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPost {
    pub post: Post,
    pub comment_count: usize,
}

/// Filter and sort options for a listing
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Run the filter/search/sort pipeline over `posts`
    ///
    /// A blank search term matches everything. Sorting is stable, so ties
    /// keep their stored order.
    pub fn apply(&self, posts: Vec<Post>, comments: &CommentMap) -> Vec<ListedPost> {
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut listed: Vec<ListedPost> = posts
            .into_iter()
            .filter(|p| self.category.map_or(true, |c| p.category == c))
            .filter(|p| needle.as_deref().map_or(true, |n| p.matches(n)))
            .map(|post| ListedPost {
                comment_count: post.comment_count(comments),
                post,
            })
            .collect();

        match self.sort {
            SortOrder::Newest => listed.sort_by(|a, b| b.post.date.cmp(&a.post.date)),
            SortOrder::Oldest => listed.sort_by(|a, b| a.post.date.cmp(&b.post.date)),
            SortOrder::Popular => listed.sort_by(|a, b| b.comment_count.cmp(&a.comment_count)),
        }

        tracing::debug!("Listing matched {} posts", listed.len());
        listed
    }
}
