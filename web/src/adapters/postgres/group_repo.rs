//! PostgreSQL adapter for GroupRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::domain::entities::{Group, GroupId, NewGroup};
use crate::domain::ports::GroupRepository;
use crate::entity::groups;
use crate::error::DomainError;

/// PostgreSQL implementation of GroupRepository
pub struct PostgresGroupRepository {
    db: DatabaseConnection,
}

impl PostgresGroupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        let result = groups::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, DomainError> {
        let result = groups::Entity::find()
            .filter(groups::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        let results = groups::Entity::find()
            .order_by_asc(groups::Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, group: &NewGroup) -> Result<Group, DomainError> {
        group.validate().map_err(DomainError::Validation)?;

        let model = groups::ActiveModel {
            title: Set(group.title.trim().to_string()),
            slug: Set(group.slug.clone()),
            description: Set(group.description.clone()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "Group with slug '{}' already exists",
                group.slug
            )),
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError> {
        // Posts keep existing with group_id NULL (ON DELETE SET NULL)
        let result = groups::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl From<groups::Model> for Group {
    fn from(model: groups::Model) -> Self {
        Group {
            id: GroupId(model.id),
            title: model.title,
            slug: model.slug,
            description: model.description,
        }
    }
}
