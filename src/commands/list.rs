//! List posts

use anyhow::Result;

use crate::helpers::format_day;
use crate::storage::Storage;
use crate::views::{ListQuery, ListedPost};
use crate::Blog;

/// Build a listing query from command-line values
pub fn parse_query(category: Option<&str>, search: Option<&str>, sort: &str) -> Result<ListQuery> {
    let mut query = ListQuery::new().sort(sort.parse()?);

    // "all" is the same as no category filter
    if let Some(category) = category.filter(|c| !c.eq_ignore_ascii_case("all")) {
        query = query.category(category.parse()?);
    }
    if let Some(term) = search {
        query = query.search(term);
    }

    Ok(query)
}

/// Render the listing as text cards
pub fn render<S: Storage>(blog: &Blog<S>, listed: &[ListedPost]) -> String {
    if listed.is_empty() {
        return "No matching posts found. Try another search term or category.\n".to_string();
    }

    let mut out = format!("Posts ({}):\n", listed.len());
    for item in listed {
        let post = &item.post;
        out.push_str(&format!(
            "  #{} {} [{}] {} ({} comments)\n",
            post.id,
            format_day(&post.date, &blog.config.date_format),
            post.category.label(),
            post.title,
            item.comment_count
        ));
        out.push_str(&format!(
            "      {}\n",
            post.excerpt(blog.config.excerpt_length)
        ));
    }
    out
}

/// Run the list command
pub async fn run<S: Storage>(blog: &Blog<S>, query: &ListQuery) -> Result<()> {
    let listed = blog.list(query).await?;
    print!("{}", render(blog, &listed));
    Ok(())
}
