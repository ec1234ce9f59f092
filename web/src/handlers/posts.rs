//! Post handlers
//!
//! Index feed, post detail, and the authoring forms.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Extension, Form,
};

use crate::app::{CommentForm, EditAccess, EditOutcome, FormErrors, PostForm, Submission};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::render::{render_index, render_post_detail, render_post_form};
use crate::AppState;

use super::{found, parse_post_id, post_url, profile_url, PageQuery};

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let page = state.feed_service.index(query.page.as_deref()).await?;
    Ok(Html(render_index(&page)?))
}

/// GET /posts/:id/
pub async fn post_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_post_id(&id)?;
    let detail = state.feed_service.post_detail(&id).await?;
    Ok(Html(render_post_detail(&detail)?))
}

/// GET /create/
pub async fn create_post_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let groups = state.post_service.groups().await?;
    Ok(Html(render_post_form(
        &PostForm::default(),
        &FormErrors::new(),
        &groups,
        None,
    )?))
}

/// POST /create/
///
/// Redirects to the author's profile, or shows the form again with errors.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    match state.post_service.create(&user, &form).await? {
        Submission::Saved(_) => Ok(found(&profile_url(&user.username))),
        Submission::Invalid(errors) => {
            let groups = state.post_service.groups().await?;
            Ok(Html(render_post_form(&form, &errors, &groups, None)?).into_response())
        }
    }
}

/// GET /posts/:id/edit/
pub async fn edit_post_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_post_id(&id)?;
    let post = match state.post_service.authorize_edit(&user, &id).await? {
        EditAccess::Allowed(post) => post,
        EditAccess::NotAuthor => return Ok(found(&post_url(&id))),
    };

    let form = PostForm {
        text: post.text,
        group: post.group.map(|g| g.id.to_string()),
        image: post.image,
    };
    let groups = state.post_service.groups().await?;
    Ok(Html(render_post_form(&form, &FormErrors::new(), &groups, Some(&id))?).into_response())
}

/// POST /posts/:id/edit/
pub async fn edit_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let id = parse_post_id(&id)?;
    match state.post_service.edit(&user, &id, &form).await? {
        EditOutcome::Updated(_) | EditOutcome::NotAuthor => Ok(found(&post_url(&id))),
        EditOutcome::Invalid(errors) => {
            let groups = state.post_service.groups().await?;
            Ok(Html(render_post_form(&form, &errors, &groups, Some(&id))?).into_response())
        }
    }
}

/// POST /posts/:id/delete/
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_post_id(&id)?;
    if state.post_service.delete(&user, &id).await? {
        Ok(found(&profile_url(&user.username)))
    } else {
        Ok(found(&post_url(&id)))
    }
}

/// POST /posts/:id/comment/
///
/// Always lands back on the post; a blank comment is dropped.
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let id = parse_post_id(&id)?;
    if let Submission::Invalid(errors) = state.post_service.add_comment(&user, &id, &form).await? {
        tracing::debug!(post_id = %id, ?errors, "Comment rejected");
    }
    Ok(found(&post_url(&id)))
}
