//! Full pages
//!
//! Cached pages (index, group, profile, post detail) must not depend on who
//! is asking: they are stored by URL and served to everyone.

use askama::Template;

use crate::app::{FormErrors, GroupFeed, PostDetail, PostForm, ProfileFeed};
use crate::domain::entities::{Comment, Group, Post, PostId, User};
use crate::domain::pagination::Page;
use crate::error::AppError;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    page: &'a Page<Post>,
    show_group_link: bool,
}

#[derive(Template)]
#[template(path = "group.html")]
struct GroupPage<'a> {
    group: &'a Group,
    page: &'a Page<Post>,
    show_group_link: bool,
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfilePage<'a> {
    author: &'a User,
    post_count: u64,
    page: &'a Page<Post>,
    show_group_link: bool,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
struct PostDetailPage<'a> {
    post: &'a Post,
    author_post_count: u64,
    comments: &'a [Comment],
}

/// One entry of the group drop-down
struct GroupOption<'a> {
    value: String,
    title: &'a str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "post_form.html")]
struct PostFormPage<'a> {
    form: &'a PostForm,
    errors: &'a FormErrors,
    groups: Vec<GroupOption<'a>>,
    image: &'a str,
    editing: Option<&'a PostId>,
}

#[derive(Template)]
#[template(path = "follow_index.html")]
struct FollowIndexPage<'a> {
    page: &'a Page<Post>,
    show_group_link: bool,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage<'a> {
    next: Option<&'a str>,
    error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "signup.html")]
struct SignupPage<'a> {
    user: &'a User,
    token: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status: u16,
    title: &'a str,
    details: Option<&'a str>,
}

fn render<T: Template>(template: &T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render template: {}", e)))
}

/// GET /
pub fn render_index(page: &Page<Post>) -> Result<String, AppError> {
    render(&IndexPage {
        page,
        show_group_link: true,
    })
}

/// GET /group/:slug/
pub fn render_group(feed: &GroupFeed) -> Result<String, AppError> {
    render(&GroupPage {
        group: &feed.group,
        page: &feed.page,
        show_group_link: false,
    })
}

/// GET /profile/:username/
pub fn render_profile(feed: &ProfileFeed) -> Result<String, AppError> {
    render(&ProfilePage {
        author: &feed.author,
        post_count: feed.post_count,
        page: &feed.page,
        show_group_link: true,
    })
}

/// GET /posts/:id/
pub fn render_post_detail(detail: &PostDetail) -> Result<String, AppError> {
    render(&PostDetailPage {
        post: &detail.post,
        author_post_count: detail.author_post_count,
        comments: &detail.comments,
    })
}

/// Create or edit form. `editing` is the post being edited, if any.
pub fn render_post_form(
    form: &PostForm,
    errors: &FormErrors,
    groups: &[Group],
    editing: Option<&PostId>,
) -> Result<String, AppError> {
    let selected = form.group.as_deref().unwrap_or("");
    let groups = groups
        .iter()
        .map(|group| {
            let value = group.id.to_string();
            GroupOption {
                selected: value == selected,
                value,
                title: &group.title,
            }
        })
        .collect();

    render(&PostFormPage {
        form,
        errors,
        groups,
        image: form.image.as_deref().unwrap_or(""),
        editing,
    })
}

/// GET /follow/
pub fn render_follow_index(page: &Page<Post>) -> Result<String, AppError> {
    render(&FollowIndexPage {
        page,
        show_group_link: true,
    })
}

/// Login form, with signup below it
pub fn render_login(next: Option<&str>, error: Option<&str>) -> Result<String, AppError> {
    render(&LoginPage { next, error })
}

/// Shown once after signup: the only time the token is visible
pub fn render_signup(user: &User, token: &str) -> Result<String, AppError> {
    render(&SignupPage { user, token })
}

/// Error page for a status code. Falls back to plain text if the template
/// itself fails, since this runs while turning an error into a response.
pub fn render_error(status: u16, title: &str, details: Option<&str>) -> String {
    ErrorPage {
        status,
        title,
        details,
    }
    .render()
    .unwrap_or_else(|e| {
        tracing::error!("Failed to render error page: {}", e);
        format!("{} {}", status, title)
    })
}
