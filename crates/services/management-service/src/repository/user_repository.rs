//! User repository: contract and SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::contains_pattern;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::context::RequestContext;
use common::{AppError, AppResult, OptionExt};
use domain::{Id, MatchMode, Resource, SearchFilter, User, UserChanges, UserFilter, USER_CREATED};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; returns a confirmation message and the stored user
    async fn create(&self, ctx: &RequestContext, user: User) -> AppResult<(String, User)>;

    /// Find user by ID
    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<User>;

    /// Overwrite the supplied fields of an existing user
    async fn update(&self, ctx: &RequestContext, id: &Id, changes: UserChanges) -> AppResult<()>;

    /// Permanently delete user
    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()>;

    /// List all users
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<User>>;

    /// Users whose `filter` field matches `value`
    async fn search(&self, ctx: &RequestContext, filter: UserFilter, value: &str) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(filter: UserFilter) -> user::Column {
    match filter {
        UserFilter::Name => user::Column::Name,
        UserFilter::Email => user::Column::Email,
        UserFilter::Role => user::Column::Role,
    }
}

fn into_users(models: Vec<user::Model>) -> AppResult<Vec<User>> {
    models.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, ctx: &RequestContext, user: User) -> AppResult<(String, User)> {
        let active_model = ActiveModel::from(user);
        let model = ctx
            .guard(async { active_model.insert(&self.db).await.map_err(AppError::from) })
            .await?;

        Ok((USER_CREATED.to_string(), User::try_from(model)?))
    }

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<User> {
        let model = ctx
            .guard(async {
                UserEntity::find_by_id(id.as_str())
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?
            .ok_or_not_found(Resource::User)?;

        User::try_from(model)
    }

    async fn update(&self, ctx: &RequestContext, id: &Id, changes: UserChanges) -> AppResult<()> {
        let existing = ctx
            .guard(async {
                UserEntity::find_by_id(id.as_str())
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?
            .ok_or_not_found(Resource::User)?;

        if changes.is_empty() {
            return Ok(());
        }

        let mut active: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }

        ctx.guard(async { active.update(&self.db).await.map_err(AppError::from) })
            .await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        let result = ctx
            .guard(async {
                UserEntity::delete_by_id(id.as_str())
                    .exec(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(Resource::User));
        }

        Ok(())
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        let models = ctx
            .guard(async {
                UserEntity::find()
                    .order_by_asc(user::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        into_users(models)
    }

    async fn search(&self, ctx: &RequestContext, filter: UserFilter, value: &str) -> AppResult<Vec<User>> {
        let condition = match filter.match_mode() {
            MatchMode::Contains => column(filter).like(contains_pattern(value)),
            MatchMode::Exact => column(filter).eq(value),
        };

        let models = ctx
            .guard(async {
                UserEntity::find()
                    .filter(condition)
                    .order_by_asc(user::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        into_users(models)
    }
}
