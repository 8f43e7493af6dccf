//! Admin session flag and credentials
//!
//! There is no real authentication: a stored boolean marks the admin as
//! logged in until they log out, and the password is kept in plain text.

use crate::config::SiteConfig;
use crate::error::{BlogError, Result};
use crate::storage::{Keys, Storage};

const ADMIN_FLAG: &str = "true";

/// Who is using the blog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub is_admin: bool,
}

impl Session {
    /// A visitor without admin rights
    pub fn guest() -> Self {
        Self { is_admin: false }
    }

    /// A logged-in admin
    pub fn admin() -> Self {
        Self { is_admin: true }
    }
}

/// Reads and writes the session flag and password override
pub struct SessionStore<'a, S: Storage + ?Sized> {
    storage: &'a S,
    keys: &'a Keys,
    config: &'a SiteConfig,
}

impl<'a, S: Storage + ?Sized> SessionStore<'a, S> {
    pub fn new(storage: &'a S, keys: &'a Keys, config: &'a SiteConfig) -> Self {
        Self {
            storage,
            keys,
            config,
        }
    }

    /// Current session, from the stored flag
    pub fn load(&self) -> Result<Session> {
        let flag = self.storage.get(&self.keys.admin())?;
        Ok(Session {
            is_admin: flag.as_deref() == Some(ADMIN_FLAG),
        })
    }

    /// Check credentials and mark the admin as logged in
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username != self.config.admin_username || password != self.current_password()? {
            tracing::warn!("Rejected admin login for {:?}", username);
            return Err(BlogError::InvalidCredentials);
        }

        self.storage.set(&self.keys.admin(), ADMIN_FLAG)?;
        tracing::info!("Admin {} logged in", username);
        Ok(Session::admin())
    }

    /// Clear the session flag
    pub fn logout(&self) -> Result<()> {
        self.storage.remove(&self.keys.admin())?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// The stored password override, or the configured default
    pub fn current_password(&self) -> Result<String> {
        Ok(self
            .storage
            .get(&self.keys.admin_password())?
            .unwrap_or_else(|| self.config.default_password.clone()))
    }

    /// Store a new password override
    pub fn set_password(&self, password: &str) -> Result<()> {
        self.storage.set(&self.keys.admin_password(), password)?;
        tracing::info!("Admin password changed");
        Ok(())
    }
}
