//! User use cases.

use common::{AppError, AppResult};
use domain::{validate_search, CreateUserRequest, Id, UpdateUserRequest, User, UserChanges, UserFilter, UserResponse};

use super::management_service::{log_failure, ManagementService};
use crate::context::RequestContext;

impl ManagementService {
    /// Validate the request, mint an id and store the user.
    pub async fn create_user(&self, ctx: &RequestContext, req: CreateUserRequest) -> AppResult<(String, UserResponse)> {
        let user = User::from_request(Id::generate(), req)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "create user", e))?;

        let (message, user) = self
            .users
            .create(ctx, user)
            .await
            .inspect_err(|e| log_failure(ctx, "create user", e))?;

        tracing::info!(parent: ctx.span(), user_id = %user.id, "user created");
        Ok((message, UserResponse::from(user)))
    }

    pub async fn get_user(&self, ctx: &RequestContext, id: &Id) -> AppResult<UserResponse> {
        let user = self
            .users
            .get(ctx, id)
            .await
            .inspect_err(|e| log_failure(ctx, "get user", e))?;

        Ok(UserResponse::from(user))
    }

    /// Apply the non-blank fields of `req`. Id and registration date never change.
    pub async fn update_user(&self, ctx: &RequestContext, id: &Id, req: UpdateUserRequest) -> AppResult<()> {
        let changes = UserChanges::try_from(req)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "update user", e))?;

        self.users
            .update(ctx, id, changes)
            .await
            .inspect_err(|e| log_failure(ctx, "update user", e))
    }

    pub async fn delete_user(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        self.users
            .delete(ctx, id)
            .await
            .inspect_err(|e| log_failure(ctx, "delete user", e))
    }

    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<UserResponse>> {
        let users = self
            .users
            .list(ctx)
            .await
            .inspect_err(|e| log_failure(ctx, "list users", e))?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Search on one whitelisted field. Rejected searches never reach storage.
    pub async fn search_users(&self, ctx: &RequestContext, filter: &str, value: &str) -> AppResult<Vec<UserResponse>> {
        let (filter, value) = validate_search::<UserFilter>(filter, value)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "search users", e))?;

        let users = self
            .users
            .search(ctx, filter, value)
            .await
            .inspect_err(|e| log_failure(ctx, "search users", e))?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::{always, eq};

    use super::*;
    use crate::repository::{MockProjectRepository, MockTaskRepository, MockUserRepository};
    use crate::service::ServiceConfig;
    use domain::{Resource, SearchError, UserRole, USER_CREATED};

    fn service(users: MockUserRepository) -> ManagementService {
        ManagementService::new(ServiceConfig {
            users: Arc::new(users),
            tasks: Arc::new(MockTaskRepository::new()),
            projects: Arc::new(MockProjectRepository::new()),
        })
    }

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            registration_date: "2024-02-29".into(),
            role: "admin".into(),
        }
    }

    #[tokio::test]
    async fn test_create_user_mints_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_, user| Ok((USER_CREATED.to_string(), user)));

        let ctx = RequestContext::new();
        let (message, user) = service(repo).create_user(&ctx, request()).await.unwrap();

        assert_eq!(message, "user created");
        assert!(Id::parse(&user.id).is_ok());
        assert_eq!(user.role, "admin");
        assert_eq!(user.registration_date, "2024-02-29");
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_repository() {
        let repo = MockUserRepository::new();
        let ctx = RequestContext::new();
        let req = CreateUserRequest {
            email: "broken".into(),
            ..request()
        };

        let err = service(repo).create_user(&ctx, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref fields) if fields[0].field == "email"));
    }

    #[tokio::test]
    async fn test_get_user_not_found_passes_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .returning(|_, _| Err(AppError::NotFound(Resource::User)));

        let ctx = RequestContext::new();
        let id = Id::generate();
        let err = service(repo).get_user(&ctx, &id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(Resource::User)));
    }

    #[tokio::test]
    async fn test_update_sends_only_supplied_fields() {
        let id = Id::parse("u1").unwrap();
        let expected = UserChanges {
            role: Some(UserRole::Manager),
            ..Default::default()
        };

        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .with(always(), eq(id.clone()), eq(expected))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let ctx = RequestContext::new();
        let req = UpdateUserRequest {
            name: Some("".into()),
            email: None,
            role: Some("manager".into()),
        };
        service(repo).update_user(&ctx, &id, req).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_rejections_skip_repository() {
        let ctx = RequestContext::new();
        let svc = service(MockUserRepository::new());

        for filter in ["name", "email", "role"] {
            let err = svc.search_users(&ctx, filter, "").await.unwrap_err();
            assert!(matches!(err, AppError::Search(SearchError::EmptyValue)));
        }

        let err = svc.search_users(&ctx, "password", "x").await.unwrap_err();
        assert!(matches!(err, AppError::Search(SearchError::UnsupportedFilter(ref f)) if f == "password"));
    }

    #[tokio::test]
    async fn test_search_forwards_typed_filter() {
        let mut repo = MockUserRepository::new();
        repo.expect_search()
            .with(always(), eq(UserFilter::Email), eq("example.com"))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let ctx = RequestContext::new();
        let found = service(repo).search_users(&ctx, "email", "example.com").await.unwrap();
        assert!(found.is_empty());
    }
}
