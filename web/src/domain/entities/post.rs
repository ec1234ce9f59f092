//! Post domain entity
//!
//! A post is authored once and stamped with `pub_date` at creation. Edits may
//! change the text, group and image, never the publication date or author.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GroupId, GroupRef, UserId, UserRef};

/// Number of characters shown when a post is displayed in short form
const EXCERPT_LEN: usize = 15;

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub i64);

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: UserRef,
    pub group: Option<GroupRef>,
    /// Reference to an image held by the media store
    pub image: Option<String>,
}

impl Post {
    /// First characters of the text, used in titles and listings
    pub fn excerpt(&self) -> String {
        self.text.chars().take(EXCERPT_LEN).collect()
    }

    pub fn is_authored_by(&self, user: &UserId) -> bool {
        self.author.id == *user
    }
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.excerpt())
    }
}

/// Data needed to create a new post; `pub_date` is assigned by the store
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub author_id: UserId,
    pub group_id: Option<GroupId>,
    pub image: Option<String>,
}

/// Mutable fields of an existing post
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub text: String,
    pub group_id: Option<GroupId>,
    pub image: Option<String>,
}

/// Filter applied to the post table before pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post
    All,
    /// Posts filed under one group
    Group(GroupId),
    /// Posts by one author
    Author(UserId),
    /// Posts by any of the given authors (the following feed)
    Authors(Vec<UserId>),
}

impl FeedScope {
    /// Whether a post falls inside this scope
    pub fn contains(&self, post: &Post) -> bool {
        match self {
            FeedScope::All => true,
            FeedScope::Group(id) => post.group.as_ref().map(|g| g.id) == Some(*id),
            FeedScope::Author(id) => post.author.id == *id,
            FeedScope::Authors(ids) => ids.contains(&post.author.id),
        }
    }
}
