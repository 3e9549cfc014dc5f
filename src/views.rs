/// Askama templates for every page
///
/// Templates live under `templates/` and share a base layout. Handlers
/// pass typed structs; there is no loose data bag.
use askama::Template;

use crate::models::{Comment, Post};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct PostIndexTemplate<'a> {
    pub posts: &'a [Post],
}

#[derive(Template)]
#[template(path = "posts/new.html")]
pub struct NewPostTemplate;

#[derive(Template)]
#[template(path = "posts/show.html")]
pub struct ShowPostTemplate<'a> {
    pub post: &'a Post,
    pub comments: &'a [Comment],
}

#[derive(Template)]
#[template(path = "posts/edit.html")]
pub struct EditPostTemplate<'a> {
    pub post: &'a Post,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub status: u16,
    pub message: &'a str,
}

pub mod filters {
    use chrono::{DateTime, Utc};

    /// Creation timestamps render as e.g. "7 March 2026 14:05".
    pub fn format_date(value: &DateTime<Utc>) -> askama::Result<String> {
        Ok(value.format("%-d %B %Y %H:%M").to_string())
    }
}
