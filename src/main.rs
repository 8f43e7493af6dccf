//! CLI entry point for localblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use localblog::admin::PostForm;
use localblog::commands::{self, admin::PostEdit, admin::SettingsUpdate};
use localblog::content::{Category, CommentForm};

#[derive(Parser)]
#[command(name = "localblog")]
#[command(version = "0.1.0")]
#[command(about = "A personal blog kept in local storage", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog and seed its store
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,

        /// Replace stored posts with the bundled seed file
        #[arg(short, long)]
        force: bool,
    },

    /// Clear stored posts, comments and settings, then reload the bundled content
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List posts
    #[command(alias = "ls")]
    List {
        /// Only show posts of this category (or "all")
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive search in title and content
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (newest, oldest, popular)
        #[arg(long, default_value = "newest")]
        sort: String,
    },

    /// Show a post with its comments
    Show {
        /// Post id
        id: u64,
    },

    /// Comment on a post
    Comment {
        /// Post id
        post_id: u64,

        #[arg(short, long)]
        author: String,

        #[arg(short = 'm', long)]
        content: String,

        #[arg(short, long)]
        email: Option<String>,
    },

    /// Start an admin session
    Login {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// End the admin session
    Logout {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the site header texts
    Settings,

    /// Show or set the theme preference
    Theme {
        /// light, dark, blue or green
        value: Option<String>,
    },

    /// Admin panel
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Dashboard numbers
    Stats,

    /// List all posts
    Posts,

    /// Create a post
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short = 'm', long)]
        content: String,

        #[arg(short, long, default_value = "uncategorized")]
        category: Category,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Edit a post
    Edit {
        id: u64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short = 'm', long)]
        content: Option<String>,

        #[arg(short, long)]
        category: Option<Category>,

        /// Replace the tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a post and its comments
    Delete {
        id: u64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List all comments
    Comments,

    /// Delete one comment
    DeleteComment {
        post_id: u64,
        comment_id: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or update the settings form
    Settings {
        #[arg(long)]
        site_title: Option<String>,

        #[arg(long)]
        hero_title: Option<String>,

        #[arg(long)]
        hero_subtitle: Option<String>,

        #[arg(long)]
        profile_desc: Option<String>,
    },

    /// Change the admin password
    Password {
        #[arg(long)]
        current: String,

        #[arg(long)]
        new: String,

        #[arg(long)]
        confirm: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "localblog=debug,info"
    } else {
        "localblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    if let Commands::Init { folder, force } = cli.command {
        let target_dir = if folder.is_absolute() {
            folder
        } else {
            base_dir.join(folder)
        };
        tracing::info!("Initializing blog in {:?}", target_dir);
        commands::init::init_site(&target_dir)?;

        let blog = localblog::Blog::new(&target_dir)?;
        let count = commands::init::seed(&blog, force).await?;
        println!("Initialized blog in {:?} with {} posts", target_dir, count);
        return Ok(());
    }

    let blog = localblog::Blog::new(&base_dir)?;

    match cli.command {
        Commands::Init { .. } => {}

        Commands::Reset { yes } => commands::init::reset(&blog, yes).await?,

        Commands::List {
            category,
            search,
            sort,
        } => {
            let query =
                commands::list::parse_query(category.as_deref(), search.as_deref(), &sort)?;
            commands::list::run(&blog, &query).await?;
        }

        Commands::Show { id } => commands::show::run(&blog, id).await?,

        Commands::Comment {
            post_id,
            author,
            content,
            email,
        } => {
            let form = CommentForm {
                author,
                email,
                content,
            };
            commands::comment::run(&blog, post_id, form).await?;
        }

        Commands::Login { username, password } => {
            commands::session::login(&blog, username, password)?
        }

        Commands::Logout { yes } => commands::session::logout(&blog, yes).await?,

        Commands::Settings => commands::settings::show(&blog)?,

        Commands::Theme { value } => commands::settings::theme(&blog, value.as_deref())?,

        Commands::Admin { action } => match action {
            AdminAction::Stats => commands::admin::stats(&blog).await?,

            AdminAction::Posts => commands::admin::posts(&blog).await?,

            AdminAction::Create {
                title,
                content,
                category,
                tags,
                image,
            } => {
                let form = PostForm {
                    title,
                    content,
                    category,
                    tags: Some(tags),
                    image,
                };
                commands::admin::create(&blog, form).await?;
            }

            AdminAction::Edit {
                id,
                title,
                content,
                category,
                tags,
                image,
            } => {
                let changes = PostEdit {
                    title,
                    content,
                    category,
                    tags: (!tags.is_empty()).then_some(tags),
                    image,
                };
                commands::admin::edit(&blog, id, changes).await?;
            }

            AdminAction::Delete { id, yes } => commands::admin::delete(&blog, id, yes).await?,

            AdminAction::Comments => commands::admin::comments(&blog).await?,

            AdminAction::DeleteComment {
                post_id,
                comment_id,
                yes,
            } => commands::admin::delete_comment(&blog, post_id, comment_id, yes).await?,

            AdminAction::Settings {
                site_title,
                hero_title,
                hero_subtitle,
                profile_desc,
            } => {
                let update = SettingsUpdate {
                    site_title,
                    hero_title,
                    hero_subtitle,
                    profile_desc,
                };
                commands::admin::settings(&blog, update).await?;
            }

            AdminAction::Password {
                current,
                new,
                confirm,
            } => commands::admin::password(&blog, &current, &new, &confirm).await?,
        },
    }

    Ok(())
}
