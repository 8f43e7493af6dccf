//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::Settings;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // Storage
    pub storage_file: String,
    pub seed_file: String,
    pub key_prefix: String,

    // Admin
    pub admin_username: String,
    pub default_password: String,
    pub min_password_length: usize,

    // Views
    pub related_limit: usize,
    pub excerpt_length: usize,

    // Date / Time format
    pub date_format: String,
    pub datetime_format: String,

    // Values used until the settings form is saved
    pub default_settings: Settings,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "localblog".to_string(),
            author: "John Doe".to_string(),

            storage_file: ".localblog/storage.json".to_string(),
            seed_file: "data/posts.json".to_string(),
            key_prefix: "blog".to_string(),

            admin_username: "admin".to_string(),
            default_password: "changeme".to_string(),
            min_password_length: 6,

            related_limit: 3,
            excerpt_length: 120,

            date_format: "YYYY-MM-DD".to_string(),
            datetime_format: "YYYY-MM-DD HH:mm".to_string(),

            default_settings: Settings::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
