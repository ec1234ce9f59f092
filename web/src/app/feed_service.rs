//! Feed service
//!
//! Assembles paginated post feeds for each scope (everything, a group, an
//! author, the authors a user follows) and the post detail view. Reads only.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{Comment, FeedScope, Group, Post, PostId, User, UserId};
use crate::domain::pagination::{Page, Paginator, PAGE_SIZE};
use crate::domain::ports::{CommentRepository, GroupRepository, PostRepository, UserRepository};
use crate::error::AppError;

/// A group's feed
#[derive(Debug, Clone, Serialize)]
pub struct GroupFeed {
    pub group: Group,
    pub page: Page<Post>,
}

/// An author's profile feed
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeed {
    pub author: User,
    /// Total posts by the author
    pub post_count: u64,
    pub page: Page<Post>,
}

/// A single post with its comments
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    /// Total posts by the post's author
    pub author_post_count: u64,
    pub comments: Vec<Comment>,
}

/// Service for assembling feeds
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            comments,
        }
    }

    /// One page of posts in `scope`, newest first
    pub async fn page(&self, scope: &FeedScope, raw_page: Option<&str>) -> Result<Page<Post>, AppError> {
        if matches!(scope, FeedScope::Authors(ids) if ids.is_empty()) {
            return Ok(Page::empty());
        }

        let count = self.posts.count(scope).await?;
        let paginator = Paginator::new(count, PAGE_SIZE);
        let number = paginator.page_number(raw_page);

        let items = if count == 0 {
            Vec::new()
        } else {
            self.posts
                .find_page(scope, paginator.per_page(), paginator.offset(number))
                .await?
        };

        Ok(Page::new(items, number, &paginator))
    }

    /// Index feed: every post
    pub async fn index(&self, raw_page: Option<&str>) -> Result<Page<Post>, AppError> {
        self.page(&FeedScope::All, raw_page).await
    }

    /// Posts filed under the group with `slug`
    pub async fn group(&self, slug: &str, raw_page: Option<&str>) -> Result<GroupFeed, AppError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group '{}' not found", slug)))?;

        let page = self.page(&FeedScope::Group(group.id), raw_page).await?;

        Ok(GroupFeed { group, page })
    }

    /// Posts by the user with `username`, with their total post count
    pub async fn profile(
        &self,
        username: &str,
        raw_page: Option<&str>,
    ) -> Result<ProfileFeed, AppError> {
        let author = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;

        let page = self.page(&FeedScope::Author(author.id), raw_page).await?;

        Ok(ProfileFeed {
            author,
            post_count: page.count,
            page,
        })
    }

    /// Posts by any of `authors`, merged newest first
    pub async fn following(
        &self,
        authors: Vec<UserId>,
        raw_page: Option<&str>,
    ) -> Result<Page<Post>, AppError> {
        self.page(&FeedScope::Authors(authors), raw_page).await
    }

    /// A post with its comments and its author's post count
    pub async fn post_detail(&self, id: &PostId) -> Result<PostDetail, AppError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

        let author_post_count = self.posts.count(&FeedScope::Author(post.author.id)).await?;
        let comments = self.comments.find_by_post(id).await?;

        Ok(PostDetail {
            post,
            author_post_count,
            comments,
        })
    }
}
