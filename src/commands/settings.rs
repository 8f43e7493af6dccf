//! Public site texts and the theme preference

use anyhow::Result;

use crate::content::{Settings, Theme};
use crate::storage::Storage;
use crate::Blog;

pub fn render(settings: &Settings) -> String {
    format!(
        "{}\n\n{}\n{}\n\nAbout: {}\n",
        settings.site_title, settings.hero_title, settings.hero_subtitle, settings.profile_desc
    )
}

/// Print the site header texts
pub fn show<S: Storage>(blog: &Blog<S>) -> Result<()> {
    let settings = blog.settings().load()?;
    print!("{}", render(&settings));
    Ok(())
}

/// Print or change the theme preference
pub fn theme<S: Storage>(blog: &Blog<S>, value: Option<&str>) -> Result<()> {
    let store = blog.settings();

    match value {
        Some(value) => {
            let theme: Theme = value.parse()?;
            store.set_theme(theme)?;
            println!("Theme set to {}.", theme);
        }
        None => match store.theme()? {
            Some(theme) => println!("{}", theme),
            None => println!("{} (default)", Theme::Light),
        },
    }
    Ok(())
}
