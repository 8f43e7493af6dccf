//! Log in and out of the admin session

use anyhow::Result;

use super::{read_line, Prompt};
use crate::error::BlogError;
use crate::storage::Storage;
use crate::Blog;

/// Log in, asking for whatever was not given on the command line
pub fn login<S: Storage>(
    blog: &Blog<S>,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(name) => name,
        None => read_line("Username: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => read_line("Password: ")?,
    };

    match blog.sessions().login(username.trim(), &password) {
        Ok(_) => {
            tracing::info!("Admin session started");
            println!("Logged in. Run `localblog admin stats` to open the dashboard.");
            Ok(())
        }
        Err(BlogError::InvalidCredentials) => {
            anyhow::bail!("Wrong username or password")
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout<S: Storage>(blog: &Blog<S>, assume_yes: bool) -> Result<()> {
    let session = blog.sessions().load()?;
    if !session.is_admin {
        println!("Not logged in.");
        return Ok(());
    }

    let panel = blog.admin(&session).await?;
    match panel.logout(&mut Prompt::new(assume_yes)) {
        Ok(()) => println!("Logged out."),
        Err(BlogError::Cancelled) => println!("Still logged in."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::storage::MemoryStorage;
    use std::path::PathBuf;

    fn blog() -> Blog<MemoryStorage> {
        Blog::with_storage(
            SiteConfig::default(),
            PathBuf::from("."),
            MemoryStorage::new(),
        )
    }

    #[test]
    fn test_login() {
        let blog = blog();

        let err = login(&blog, Some("admin".into()), Some("wrong".into())).unwrap_err();
        assert_eq!(err.to_string(), "Wrong username or password");
        assert!(!blog.sessions().load().unwrap().is_admin);

        login(&blog, Some(" admin ".into()), Some("changeme".into())).unwrap();
        assert!(blog.sessions().load().unwrap().is_admin);
    }
}
