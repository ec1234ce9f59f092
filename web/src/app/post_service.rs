//! Post service
//!
//! Authoring operations on posts and comments. Authorization failures are
//! reported as outcomes rather than errors so handlers can redirect.

use std::sync::Arc;

use crate::app::forms::{CleanPost, CommentForm, FormErrors, PostForm, INVALID_CHOICE};
use crate::domain::entities::{
    Comment, Group, NewComment, NewPost, Post, PostChanges, PostId, User,
};
use crate::domain::ports::{CommentRepository, GroupRepository, PostRepository};
use crate::error::AppError;

/// Result of a form submission
#[derive(Debug)]
pub enum Submission<T> {
    Saved(T),
    Invalid(FormErrors),
}

/// Whether a user may open a post's edit form
#[derive(Debug)]
pub enum EditAccess {
    Allowed(Post),
    NotAuthor,
}

/// Result of an edit submission
#[derive(Debug)]
pub enum EditOutcome {
    Updated(Post),
    NotAuthor,
    Invalid(FormErrors),
}

/// Service for writing posts and comments
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            comments,
        }
    }

    /// Groups a post can be filed under
    pub async fn groups(&self) -> Result<Vec<Group>, AppError> {
        Ok(self.groups.list().await?)
    }

    /// Publish a new post by `author`
    pub async fn create(&self, author: &User, form: &PostForm) -> Result<Submission<Post>, AppError> {
        let clean = match self.clean_post(form).await? {
            Ok(clean) => clean,
            Err(errors) => return Ok(Submission::Invalid(errors)),
        };

        let post = self
            .posts
            .create(&NewPost {
                text: clean.text,
                author_id: author.id,
                group_id: clean.group_id,
                image: clean.image,
            })
            .await?;

        tracing::info!(
            post_id = %post.id,
            username = %author.username,
            "Post created"
        );

        Ok(Submission::Saved(post))
    }

    /// Load a post for editing by `user`
    pub async fn authorize_edit(&self, user: &User, id: &PostId) -> Result<EditAccess, AppError> {
        let post = self.get_post(id).await?;
        if !post.is_authored_by(&user.id) {
            return Ok(EditAccess::NotAuthor);
        }
        Ok(EditAccess::Allowed(post))
    }

    /// Apply an edit; only the author may change a post
    pub async fn edit(
        &self,
        user: &User,
        id: &PostId,
        form: &PostForm,
    ) -> Result<EditOutcome, AppError> {
        let post = self.get_post(id).await?;
        if !post.is_authored_by(&user.id) {
            tracing::debug!(post_id = %id, username = %user.username, "Edit by non-author refused");
            return Ok(EditOutcome::NotAuthor);
        }

        let clean = match self.clean_post(form).await? {
            Ok(clean) => clean,
            Err(errors) => return Ok(EditOutcome::Invalid(errors)),
        };

        let updated = self
            .posts
            .update(
                id,
                &PostChanges {
                    text: clean.text,
                    group_id: clean.group_id,
                    image: clean.image,
                },
            )
            .await?;

        tracing::info!(post_id = %id, username = %user.username, "Post edited");

        Ok(EditOutcome::Updated(updated))
    }

    /// Delete a post. Returns false without touching it if `user` is not the author.
    pub async fn delete(&self, user: &User, id: &PostId) -> Result<bool, AppError> {
        let post = self.get_post(id).await?;
        if !post.is_authored_by(&user.id) {
            tracing::debug!(post_id = %id, username = %user.username, "Delete by non-author refused");
            return Ok(false);
        }

        self.posts.delete(id).await?;

        tracing::info!(post_id = %id, username = %user.username, "Post deleted");

        Ok(true)
    }

    /// Comment on a post
    pub async fn add_comment(
        &self,
        author: &User,
        post_id: &PostId,
        form: &CommentForm,
    ) -> Result<Submission<Comment>, AppError> {
        self.get_post(post_id).await?;

        let text = match form.clean() {
            Ok(text) => text,
            Err(errors) => return Ok(Submission::Invalid(errors)),
        };

        let comment = self
            .comments
            .create(&NewComment {
                text,
                author_id: author.id,
                post_id: *post_id,
            })
            .await?;

        tracing::info!(
            post_id = %post_id,
            username = %author.username,
            "Comment added"
        );

        Ok(Submission::Saved(comment))
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, AppError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }

    /// Form checks plus "the chosen group exists"
    async fn clean_post(&self, form: &PostForm) -> Result<Result<CleanPost, FormErrors>, AppError> {
        let clean = match form.clean() {
            Ok(clean) => clean,
            Err(errors) => return Ok(Err(errors)),
        };

        if let Some(group_id) = &clean.group_id {
            if self.groups.find_by_id(group_id).await?.is_none() {
                let mut errors = FormErrors::new();
                errors.add("group", INVALID_CHOICE);
                return Ok(Err(errors));
            }
        }

        Ok(Ok(clean))
    }
}
