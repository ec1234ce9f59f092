//! PostgreSQL adapter for PostRepository
//!
//! Posts are loaded in one query and their authors and groups in one query
//! each, then stitched into domain `Post`s.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::entities::{
    FeedScope, GroupId, GroupRef, NewPost, Post, PostChanges, PostId, UserId, UserRef,
};
use crate::domain::ports::PostRepository;
use crate::entity::{groups, posts, users};
use crate::error::DomainError;

/// PostgreSQL implementation of PostRepository
pub struct PostgresPostRepository {
    db: DatabaseConnection,
}

impl PostgresPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach author and group references to raw post rows, preserving order
    async fn hydrate(&self, models: Vec<posts::Model>) -> Result<Vec<Post>, DomainError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<i64> = models.iter().map(|m| m.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut group_ids: Vec<i64> = models.iter().filter_map(|m| m.group_id).collect();
        group_ids.sort_unstable();
        group_ids.dedup();

        let authors: HashMap<i64, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let groups: HashMap<i64, groups::Model> = if group_ids.is_empty() {
            HashMap::new()
        } else {
            groups::Entity::find()
                .filter(groups::Column::Id.is_in(group_ids))
                .all(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?
                .into_iter()
                .map(|g| (g.id, g))
                .collect()
        };

        models
            .into_iter()
            .map(|m| {
                let username = authors.get(&m.author_id).cloned().ok_or_else(|| {
                    DomainError::Internal(format!(
                        "Author {} of post {} is missing",
                        m.author_id, m.id
                    ))
                })?;
                let group = m.group_id.and_then(|id| groups.get(&id)).map(|g| GroupRef {
                    id: GroupId(g.id),
                    slug: g.slug.clone(),
                    title: g.title.clone(),
                });

                Ok(Post {
                    id: PostId(m.id),
                    text: m.text,
                    pub_date: m.pub_date.with_timezone(&Utc),
                    author: UserRef {
                        id: UserId(m.author_id),
                        username,
                    },
                    group,
                    image: m.image,
                })
            })
            .collect()
    }

    async fn hydrate_one(&self, model: posts::Model) -> Result<Post, DomainError> {
        self.hydrate(vec![model])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal("Post hydration returned nothing".to_string()))
    }
}

/// Base query for a feed scope
fn scoped(scope: &FeedScope) -> Select<posts::Entity> {
    let query = posts::Entity::find();
    match scope {
        FeedScope::All => query,
        FeedScope::Group(id) => query.filter(posts::Column::GroupId.eq(id.0)),
        FeedScope::Author(id) => query.filter(posts::Column::AuthorId.eq(id.0)),
        FeedScope::Authors(ids) => {
            query.filter(posts::Column::AuthorId.is_in(ids.iter().map(|id| id.0)))
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let result = posts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        match result {
            Some(model) => Ok(Some(self.hydrate_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_page(
        &self,
        scope: &FeedScope,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Post>, DomainError> {
        let results = scoped(scope)
            .order_by_desc(posts::Column::PubDate)
            .order_by_desc(posts::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.hydrate(results).await
    }

    async fn count(&self, scope: &FeedScope) -> Result<u64, DomainError> {
        scoped(scope)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn create(&self, post: &NewPost) -> Result<Post, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = posts::ActiveModel {
            text: Set(post.text.clone()),
            pub_date: Set(now),
            author_id: Set(post.author_id.0),
            group_id: Set(post.group_id.map(|g| g.0)),
            image: Set(post.image.clone()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.hydrate_one(result).await
    }

    async fn update(&self, id: &PostId, changes: &PostChanges) -> Result<Post, DomainError> {
        let existing = posts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Post {} not found", id)))?;

        let mut model: posts::ActiveModel = existing.into();
        model.text = Set(changes.text.clone());
        model.group_id = Set(changes.group_id.map(|g| g.0));
        model.image = Set(changes.image.clone());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.hydrate_one(result).await
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        // Comments go with the post (ON DELETE CASCADE)
        let result = posts::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
