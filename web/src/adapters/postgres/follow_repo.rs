//! PostgreSQL adapter for FollowRepository
//!
//! Edge creation relies on the `(user_id, author_id)` unique index:
//! `INSERT ... ON CONFLICT DO NOTHING` makes concurrent duplicate follows
//! collapse into one row.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::entities::{Follow, FollowId, UserId};
use crate::domain::ports::FollowRepository;
use crate::entity::follows;
use crate::error::DomainError;

/// PostgreSQL implementation of FollowRepository
pub struct PostgresFollowRepository {
    db: DatabaseConnection,
}

impl PostgresFollowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn get_or_create(
        &self,
        user_id: &UserId,
        author_id: &UserId,
    ) -> Result<(Follow, bool), DomainError> {
        let model = follows::ActiveModel {
            user_id: Set(user_id.0),
            author_id: Set(author_id.0),
            ..Default::default()
        };

        let inserted = follows::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([follows::Column::UserId, follows::Column::AuthorId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let row = follows::Entity::find()
            .filter(follows::Column::UserId.eq(user_id.0))
            .filter(follows::Column::AuthorId.eq(author_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "Follow edge {} -> {} vanished after insert",
                    user_id, author_id
                ))
            })?;

        Ok((row.into(), inserted > 0))
    }

    async fn delete(&self, user_id: &UserId, author_id: &UserId) -> Result<bool, DomainError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::UserId.eq(user_id.0))
            .filter(follows::Column::AuthorId.eq(author_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn find_followed_authors(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let author_ids: Vec<i64> = follows::Entity::find()
            .select_only()
            .column(follows::Column::AuthorId)
            .filter(follows::Column::UserId.eq(user_id.0))
            .order_by_asc(follows::Column::AuthorId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(author_ids.into_iter().map(UserId).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<follows::Model> for Follow {
    fn from(model: follows::Model) -> Self {
        Follow {
            id: FollowId(model.id),
            user_id: UserId(model.user_id),
            author_id: UserId(model.author_id),
        }
    }
}
