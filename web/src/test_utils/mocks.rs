//! Mock implementations of port traits
//!
//! `InMemoryStore` keeps every table in one lock and implements all
//! repository ports, including the cascade rules of the real schema, so
//! services and routers can be tested without PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::app::user_service::hash_session_token;
use crate::domain::entities::{
    Comment, CommentId, FeedScope, Follow, FollowId, Group, GroupId, NewComment, NewGroup,
    NewPost, NewUser, Post, PostChanges, PostId, User, UserId,
};
use crate::domain::ports::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, UserRepository,
};
use crate::error::DomainError;

#[derive(Clone)]
struct PostRow {
    id: PostId,
    text: String,
    pub_date: DateTime<Utc>,
    author_id: UserId,
    group_id: Option<GroupId>,
    image: Option<String>,
}

#[derive(Clone)]
struct CommentRow {
    id: CommentId,
    text: String,
    created: DateTime<Utc>,
    author_id: UserId,
    post_id: PostId,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    groups: BTreeMap<GroupId, Group>,
    posts: BTreeMap<PostId, PostRow>,
    comments: BTreeMap<CommentId, CommentRow>,
    follows: Vec<Follow>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn hydrate(&self, row: &PostRow) -> Post {
        Post {
            id: row.id,
            text: row.text.clone(),
            pub_date: row.pub_date,
            author: self.users[&row.author_id].to_ref(),
            group: row
                .group_id
                .and_then(|id| self.groups.get(&id))
                .map(Group::to_ref),
            image: row.image.clone(),
        }
    }

    fn hydrate_comment(&self, row: &CommentRow) -> Comment {
        Comment {
            id: row.id,
            text: row.text.clone(),
            created: row.created,
            author: self.users[&row.author_id].to_ref(),
            post_id: row.post_id,
        }
    }

    /// Posts in scope, newest first
    fn scoped(&self, scope: &FeedScope) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .map(|row| self.hydrate(row))
            .filter(|post| scope.contains(post))
            .collect();
        posts.sort_by(|a, b| (b.pub_date, b.id).cmp(&(a.pub_date, a.id)));
        posts
    }

    fn delete_post(&mut self, id: &PostId) -> bool {
        let removed = self.posts.remove(id).is_some();
        self.comments.retain(|_, c| c.post_id != *id);
        removed
    }
}

/// In-memory implementation of every repository port
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user whose session token is `token_for(username)`
    pub fn seed_user(&self, username: &str) -> User {
        let mut tables = self.tables.write().unwrap();
        let id = UserId(tables.next_id());
        let user = User {
            id,
            username: username.to_string(),
            token_hash: hash_session_token(&super::token_for(username)),
            date_joined: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        user
    }

    pub fn seed_group(&self, slug: &str) -> Group {
        let mut tables = self.tables.write().unwrap();
        let id = GroupId(tables.next_id());
        let group = Group {
            id,
            title: format!("Группа {}", slug),
            slug: slug.to_string(),
            description: "Тестовое описание".to_string(),
        };
        tables.groups.insert(id, group.clone());
        group
    }

    pub fn seed_post(&self, author: &User, group: Option<&Group>, text: &str) -> Post {
        let mut tables = self.tables.write().unwrap();
        let row = PostRow {
            id: PostId(tables.next_id()),
            text: text.to_string(),
            pub_date: Utc::now(),
            author_id: author.id,
            group_id: group.map(|g| g.id),
            image: None,
        };
        let post = tables.hydrate(&row);
        tables.posts.insert(row.id, row);
        post
    }

    pub fn seed_comment(&self, author: &User, post: &Post, text: &str) -> Comment {
        let mut tables = self.tables.write().unwrap();
        let row = CommentRow {
            id: CommentId(tables.next_id()),
            text: text.to_string(),
            created: Utc::now(),
            author_id: author.id,
            post_id: post.id,
        };
        let comment = tables.hydrate_comment(&row);
        tables.comments.insert(row.id, row);
        comment
    }

    pub fn seed_follow(&self, user: &User, author: &User) {
        let mut tables = self.tables.write().unwrap();
        let id = FollowId(tables.next_id());
        tables.follows.push(Follow {
            id,
            user_id: user.id,
            author_id: author.id,
        });
    }

    pub fn post(&self, id: &PostId) -> Option<Post> {
        let tables = self.tables.read().unwrap();
        tables.posts.get(id).map(|row| tables.hydrate(row))
    }

    pub fn user_count(&self) -> usize {
        self.tables.read().unwrap().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.tables.read().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.tables.read().unwrap().comments.len()
    }

    pub fn follow_count(&self) -> usize {
        self.tables.read().unwrap().follows.len()
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().unwrap().users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.users.values().find(|u| u.token_hash == hash).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write().unwrap();
        if tables.users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::AlreadyExists(format!(
                "User with username '{}' already exists",
                new_user.username
            )));
        }

        let id = UserId(tables.next_id());
        let user = User {
            id,
            username: new_user.username.clone(),
            token_hash: new_user.token_hash.clone(),
            date_joined: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().unwrap();
        if tables.users.remove(id).is_none() {
            return Ok(false);
        }

        let owned: Vec<PostId> = tables
            .posts
            .values()
            .filter(|p| p.author_id == *id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            tables.delete_post(&post_id);
        }
        tables.comments.retain(|_, c| c.author_id != *id);
        tables
            .follows
            .retain(|f| f.user_id != *id && f.author_id != *id);

        Ok(true)
    }
}

// ============================================================================
// Groups
// ============================================================================

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        Ok(self.tables.read().unwrap().groups.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        let mut groups: Vec<Group> = self.tables.read().unwrap().groups.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }

    async fn create(&self, new_group: &NewGroup) -> Result<Group, DomainError> {
        new_group.validate().map_err(DomainError::Validation)?;

        let mut tables = self.tables.write().unwrap();
        if tables.groups.values().any(|g| g.slug == new_group.slug) {
            return Err(DomainError::AlreadyExists(format!(
                "Group with slug '{}' already exists",
                new_group.slug
            )));
        }

        let id = GroupId(tables.next_id());
        let group = Group {
            id,
            title: new_group.title.clone(),
            slug: new_group.slug.clone(),
            description: new_group.description.clone(),
        };
        tables.groups.insert(id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().unwrap();
        if tables.groups.remove(id).is_none() {
            return Ok(false);
        }
        for post in tables.posts.values_mut() {
            if post.group_id == Some(*id) {
                post.group_id = None;
            }
        }
        Ok(true)
    }
}

// ============================================================================
// Posts
// ============================================================================

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.post(id))
    }

    async fn find_page(
        &self,
        scope: &FeedScope,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .scoped(scope)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, scope: &FeedScope) -> Result<u64, DomainError> {
        Ok(self.tables.read().unwrap().scoped(scope).len() as u64)
    }

    async fn create(&self, new_post: &NewPost) -> Result<Post, DomainError> {
        let mut tables = self.tables.write().unwrap();
        if !tables.users.contains_key(&new_post.author_id) {
            return Err(DomainError::NotFound(format!("User {}", new_post.author_id)));
        }

        let row = PostRow {
            id: PostId(tables.next_id()),
            text: new_post.text.clone(),
            pub_date: Utc::now(),
            author_id: new_post.author_id,
            group_id: new_post.group_id,
            image: new_post.image.clone(),
        };
        let post = tables.hydrate(&row);
        tables.posts.insert(row.id, row);
        Ok(post)
    }

    async fn update(&self, id: &PostId, changes: &PostChanges) -> Result<Post, DomainError> {
        let mut tables = self.tables.write().unwrap();
        let row = tables
            .posts
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Post {}", id)))?;
        row.text = changes.text.clone();
        row.group_id = changes.group_id;
        row.image = changes.image.clone();

        let row = row.clone();
        Ok(tables.hydrate(&row))
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        Ok(self.tables.write().unwrap().delete_post(id))
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == *post_id)
            .map(|c| tables.hydrate_comment(c))
            .collect();
        comments.sort_by(|a, b| (b.created, b.id).cmp(&(a.created, a.id)));
        Ok(comments)
    }

    async fn create(&self, new_comment: &NewComment) -> Result<Comment, DomainError> {
        let mut tables = self.tables.write().unwrap();
        if !tables.posts.contains_key(&new_comment.post_id) {
            return Err(DomainError::NotFound(format!("Post {}", new_comment.post_id)));
        }

        let row = CommentRow {
            id: CommentId(tables.next_id()),
            text: new_comment.text.clone(),
            created: Utc::now(),
            author_id: new_comment.author_id,
            post_id: new_comment.post_id,
        };
        let comment = tables.hydrate_comment(&row);
        tables.comments.insert(row.id, row);
        Ok(comment)
    }
}

// ============================================================================
// Follows
// ============================================================================

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn get_or_create(
        &self,
        user_id: &UserId,
        author_id: &UserId,
    ) -> Result<(Follow, bool), DomainError> {
        if user_id == author_id {
            return Err(DomainError::Validation("Users cannot follow themselves".to_string()));
        }

        let mut tables = self.tables.write().unwrap();
        if let Some(existing) = tables
            .follows
            .iter()
            .find(|f| f.user_id == *user_id && f.author_id == *author_id)
        {
            return Ok((existing.clone(), false));
        }

        let follow = Follow {
            id: FollowId(tables.next_id()),
            user_id: *user_id,
            author_id: *author_id,
        };
        tables.follows.push(follow.clone());
        Ok((follow, true))
    }

    async fn delete(&self, user_id: &UserId, author_id: &UserId) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().unwrap();
        let before = tables.follows.len();
        tables
            .follows
            .retain(|f| !(f.user_id == *user_id && f.author_id == *author_id));
        Ok(tables.follows.len() < before)
    }

    async fn find_followed_authors(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .follows
            .iter()
            .filter(|f| f.user_id == *user_id)
            .map(|f| f.author_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deleting_group_detaches_posts() {
        let store = InMemoryStore::new();
        let author = store.seed_user("author");
        let group = store.seed_group("cats");
        let post = store.seed_post(&author, Some(&group), "text");

        assert!(GroupRepository::delete(&store, &group.id).await.unwrap());

        assert!(store.post(&post.id).unwrap().group.is_none());
        assert_eq!(store.post_count(), 1);
    }

    #[tokio::test]
    async fn deleting_user_removes_everything_they_own() {
        let store = InMemoryStore::new();
        let leo = store.seed_user("leo");
        let anna = store.seed_user("anna");
        let leos_post = store.seed_post(&leo, None, "leo");
        let annas_post = store.seed_post(&anna, None, "anna");
        store.seed_comment(&anna, &leos_post, "on leo's post");
        store.seed_comment(&leo, &annas_post, "by leo");
        store.seed_follow(&anna, &leo);

        assert!(UserRepository::delete(&store, &leo.id).await.unwrap());

        assert_eq!(store.post_count(), 1);
        assert_eq!(store.comment_count(), 0);
        assert_eq!(store.follow_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_group_slug_is_rejected() {
        let store = InMemoryStore::new();
        let new_group = NewGroup {
            title: "Cats".to_string(),
            slug: "cats".to_string(),
            description: String::new(),
        };

        GroupRepository::create(&store, &new_group).await.unwrap();
        let err = GroupRepository::create(&store, &new_group).await.unwrap_err();

        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }
}
