//! PostgreSQL adapter for CommentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{Comment, CommentId, NewComment, PostId, UserId, UserRef};
use crate::domain::ports::CommentRepository;
use crate::entity::{comments, users};
use crate::error::DomainError;

/// PostgreSQL implementation of CommentRepository
pub struct PostgresCommentRepository {
    db: DatabaseConnection,
}

impl PostgresCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, DomainError> {
        let results = comments::Entity::find()
            .filter(comments::Column::PostId.eq(post_id.0))
            .find_also_related(users::Entity)
            .order_by_desc(comments::Column::Created)
            .order_by_desc(comments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results
            .into_iter()
            .map(|(comment, author)| {
                let author = author.ok_or_else(|| {
                    DomainError::Internal(format!("Author of comment {} is missing", comment.id))
                })?;
                Ok(to_domain(comment, author.username))
            })
            .collect()
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let author = users::Entity::find_by_id(comment.author_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| {
                DomainError::NotFound(format!("User {} not found", comment.author_id))
            })?;

        let now = Utc::now().fixed_offset();

        let model = comments::ActiveModel {
            text: Set(comment.text.clone()),
            created: Set(now),
            author_id: Set(comment.author_id.0),
            post_id: Set(comment.post_id.0),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(to_domain(result, author.username))
    }
}

fn to_domain(model: comments::Model, username: String) -> Comment {
    Comment {
        id: CommentId(model.id),
        text: model.text,
        created: model.created.with_timezone(&Utc),
        author: UserRef {
            id: UserId(model.author_id),
            username,
        },
        post_id: PostId(model.post_id),
    }
}
