//! Post and Category models

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::comment::CommentMap;
use crate::error::BlogError;
use crate::helpers::{contains_folded, date::calendar, excerpt};

/// Post category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Tools,
    Ctf,
    Linux,
    Tutorial,
    #[default]
    Uncategorized,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 6] = [
        Category::Security,
        Category::Tools,
        Category::Ctf,
        Category::Linux,
        Category::Tutorial,
        Category::Uncategorized,
    ];

    /// Identifier used in storage and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Tools => "tools",
            Category::Ctf => "ctf",
            Category::Linux => "linux",
            Category::Tutorial => "tutorial",
            Category::Uncategorized => "uncategorized",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Category::Security => "Security",
            Category::Tools => "Tools",
            Category::Ctf => "CTF",
            Category::Linux => "Linux",
            Category::Tutorial => "Tutorial",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| {
                BlogError::validation(format!(
                    "Unknown category: {}. Available: security, tools, ctf, linux, tutorial, uncategorized",
                    s
                ))
            })
    }
}

// Unknown category names in stored data fall back to uncategorized
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// A blog post
///
/// The comment count is not stored here; use [`Post::comment_count`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique positive id; `0` marks a post that has not been stored yet
    pub id: u64,

    /// Post title
    pub title: String,

    /// Post body, may contain raw markup
    pub content: String,

    /// Cover image URL
    #[serde(default)]
    pub image: String,

    /// Publication date
    #[serde(with = "calendar")]
    pub date: NaiveDate,

    /// Post category
    #[serde(default)]
    pub category: Category,

    /// Post tags, in author order
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Create an unsaved post
    pub fn new(title: &str, content: &str, category: Category, date: NaiveDate) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            content: content.to_string(),
            image: String::new(),
            date,
            category,
            tags: Vec::new(),
        }
    }

    /// Whether the post still needs an id
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Number of comments attached to this post
    pub fn comment_count(&self, comments: &CommentMap) -> usize {
        comments.count(self.id)
    }

    /// Case-insensitive search over title, content and tags
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle)
            || contains_folded(&self.content, needle)
            || self.tags.iter().any(|tag| contains_folded(tag, needle))
    }

    /// Leading part of the content for cards and rows
    pub fn excerpt(&self, max_chars: usize) -> String {
        excerpt(&self.content, max_chars)
    }
}

/// Placeholder cover image for posts created without one
pub fn default_image_url(id: u64) -> String {
    format!("https://picsum.photos/600/400?random={}", id)
}
