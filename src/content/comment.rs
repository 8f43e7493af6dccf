//! Comment model and the per-post comment map

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@<>()\[\],;:]+@([A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").unwrap();
}

/// A reader comment attached to one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Time-based id, unique within its post
    pub id: i64,

    /// Display name of the commenter
    pub author: String,

    /// Optional contact address, never shown publicly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Comment text
    pub content: String,

    /// When the comment was submitted
    pub date: DateTime<Local>,
}

impl Comment {
    /// Create a comment stamped with the current time
    pub fn new(author: &str, content: &str, email: Option<&str>) -> Self {
        let date = Local::now();
        Self {
            id: date.timestamp_millis(),
            author: author.to_string(),
            email: email.map(str::to_string),
            content: content.to_string(),
            date,
        }
    }
}

/// Input from the public comment form
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    pub author: String,
    pub email: Option<String>,
    pub content: String,
}

impl CommentForm {
    /// Check the form before anything is stored
    pub fn validate(&self) -> Result<()> {
        if self.author.trim().is_empty() || self.content.trim().is_empty() {
            return Err(BlogError::validation("Please fill in your name and comment"));
        }

        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !email.is_empty() && !EMAIL_RE.is_match(email) {
                return Err(BlogError::validation("Please enter a valid email address"));
            }
        }

        Ok(())
    }

    /// Validate and turn the form into a new comment
    pub fn into_comment(self) -> Result<Comment> {
        self.validate()?;
        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());
        Ok(Comment::new(self.author.trim(), self.content.trim(), email))
    }
}

/// Comments of every post, keyed by post id
///
/// A post with no comments has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentMap(IndexMap<u64, Vec<Comment>>);

impl CommentMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Comments of a post in insertion order
    pub fn get(&self, post_id: u64) -> &[Comment] {
        self.0.get(&post_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of comments on a post
    pub fn count(&self, post_id: u64) -> usize {
        self.get(post_id).len()
    }

    /// Number of comments across all posts
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Append a comment, bumping its id until it is unique within the post
    pub fn push(&mut self, post_id: u64, mut comment: Comment) -> Comment {
        let list = self.0.entry(post_id).or_default();
        while list.iter().any(|c| c.id == comment.id) {
            comment.id += 1;
        }
        list.push(comment.clone());
        comment
    }

    /// Remove one comment; drops the post's entry when it becomes empty
    pub fn remove_one(&mut self, post_id: u64, comment_id: i64) -> bool {
        let Some(list) = self.0.get_mut(&post_id) else {
            return false;
        };

        let before = list.len();
        list.retain(|c| c.id != comment_id);
        let removed = list.len() != before;

        if list.is_empty() {
            self.0.shift_remove(&post_id);
        }

        removed
    }

    /// Remove every comment of a post
    pub fn remove_all(&mut self, post_id: u64) -> bool {
        self.0.shift_remove(&post_id).is_some()
    }

    /// Keep only the entries of posts for which `keep` holds; returns how
    /// many comments were dropped
    pub fn retain_posts(&mut self, mut keep: impl FnMut(u64) -> bool) -> usize {
        let before = self.total();
        self.0.retain(|post_id, _| keep(*post_id));
        before - self.total()
    }

    /// Whether the post has an entry
    pub fn contains(&self, post_id: u64) -> bool {
        self.0.contains_key(&post_id)
    }

    /// Iterate over (post id, comments) pairs
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[Comment])> {
        self.0.iter().map(|(id, list)| (*id, list.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn comment(id: i64, author: &str) -> Comment {
        Comment {
            id,
            author: author.to_string(),
            email: None,
            content: format!("comment by {}", author),
            date: Local.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_push_makes_ids_unique() {
        let mut map = CommentMap::new();
        let first = map.push(1, comment(100, "alice"));
        let second = map.push(1, comment(100, "bob"));

        assert_eq!(first.id, 100);
        assert_eq!(second.id, 101);
        assert_eq!(map.count(1), 2);
        assert_eq!(map.count(2), 0);
        assert_eq!(map.total(), 2);
    }

    #[test]
    fn test_remove_last_drops_entry() {
        let mut map = CommentMap::new();
        map.push(3, comment(1, "alice"));
        map.push(3, comment(2, "bob"));

        assert!(map.remove_one(3, 1));
        assert!(map.contains(3));
        assert!(!map.remove_one(3, 42));
        assert!(map.remove_one(3, 2));
        assert!(!map.contains(3));
        assert!(!map.remove_one(3, 2));
    }

    #[test]
    fn test_map_serializes_with_string_keys() {
        let mut map = CommentMap::new();
        map.push(5, comment(1, "alice"));

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["5"][0]["author"], "alice");
        assert!(json["5"][0].get("email").is_none());

        let back: CommentMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_form_validation() {
        let form = CommentForm {
            author: "alice".to_string(),
            email: None,
            content: "   ".to_string(),
        };
        assert!(matches!(form.validate(), Err(BlogError::Validation(_))));

        let form = CommentForm {
            author: "alice".to_string(),
            email: Some("not-an-email".to_string()),
            content: "Nice write-up".to_string(),
        };
        assert!(matches!(form.validate(), Err(BlogError::Validation(_))));

        let form = CommentForm {
            author: " alice ".to_string(),
            email: Some("alice@example.org".to_string()),
            content: "Nice write-up".to_string(),
        };
        let comment = form.into_comment().unwrap();
        assert_eq!(comment.author, "alice");
        assert_eq!(comment.email.as_deref(), Some("alice@example.org"));
    }
}
