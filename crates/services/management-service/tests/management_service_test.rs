//! Management service integration tests over the in-memory backend.

use std::collections::HashSet;

use common::AppError;
use domain::{
    CreateProjectRequest, CreateTaskRequest, CreateUserRequest, Id, Resource, SearchError, UpdateProjectRequest,
    UpdateTaskRequest, UpdateUserRequest,
};
use management_service_lib::service::{ManagementService, ServiceConfig};
use management_service_lib::RequestContext;

fn service() -> ManagementService {
    ManagementService::new(ServiceConfig::in_memory())
}

fn ann() -> CreateUserRequest {
    CreateUserRequest {
        name: "Ann".into(),
        email: "ann@x.com".into(),
        registration_date: "2023-01-10".into(),
        role: "admin".into(),
    }
}

fn task(author: &str, project: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: "Ship release".into(),
        description: "tag and publish".into(),
        priority: "medium".into(),
        status: "in_progress".into(),
        created_at: "2024-02-29".into(),
        done_at: "2024-03-01".into(),
        author_id: author.into(),
        project_id: project.into(),
    }
}

fn project(manager: &str) -> CreateProjectRequest {
    CreateProjectRequest {
        title: "Apollo".into(),
        description: "moon".into(),
        manager_id: manager.into(),
        started_at: "2023-12-31".into(),
        finished_at: "2024-02-29".into(),
    }
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[tokio::test]
async fn test_create_user_scenario() {
    let svc = service();
    let ctx = RequestContext::new();

    let (message, user) = svc.create_user(&ctx, ann()).await.unwrap();

    assert_eq!(message, "user created");
    assert!(!user.id.is_empty());
    assert_eq!(user.name, "Ann");
    assert_eq!(user.registration_date, "2023-01-10");
}

#[tokio::test]
async fn test_search_tasks_with_bogus_field_fails() {
    let ctx = RequestContext::new();
    let err = service().search_tasks(&ctx, "bogus_field", "x").await.unwrap_err();
    assert!(matches!(err, AppError::Search(SearchError::UnsupportedFilter(_))));
}

#[tokio::test]
async fn test_search_tasks_with_empty_status_fails() {
    let ctx = RequestContext::new();
    let err = service().search_tasks(&ctx, "status", "").await.unwrap_err();
    assert!(matches!(err, AppError::Search(SearchError::EmptyValue)));
}

#[tokio::test]
async fn test_update_missing_project_is_not_found() {
    let ctx = RequestContext::new();
    let req = UpdateProjectRequest {
        title: Some("New".into()),
        ..Default::default()
    };
    let err = service()
        .update_project(&ctx, &Id::generate(), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Project)));
}

#[tokio::test]
async fn test_task_keeps_references() {
    let svc = service();
    let ctx = RequestContext::new();

    let (_, created) = svc.create_task(&ctx, task("u1", "p1")).await.unwrap();
    let fetched = svc.get_task(&ctx, &Id::parse(&created.id).unwrap()).await.unwrap();

    assert_eq!(fetched.author_id, "u1");
    assert_eq!(fetched.project_id, "p1");
}

#[tokio::test]
async fn test_double_delete_user_is_not_found() {
    let svc = service();
    let ctx = RequestContext::new();
    let (_, user) = svc.create_user(&ctx, ann()).await.unwrap();
    let id = Id::parse(&user.id).unwrap();

    svc.delete_user(&ctx, &id).await.unwrap();
    let err = svc.delete_user(&ctx, &id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::User)));
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn test_created_ids_are_unique() {
    let svc = service();
    let ctx = RequestContext::new();
    let mut seen = HashSet::new();

    for _ in 0..20 {
        let (_, user) = svc.create_user(&ctx, ann()).await.unwrap();
        let (_, task) = svc.create_task(&ctx, task("u1", "p1")).await.unwrap();
        let (_, project) = svc.create_project(&ctx, project("u1")).await.unwrap();
        assert!(seen.insert(user.id));
        assert!(seen.insert(task.id));
        assert!(seen.insert(project.id));
    }
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let svc = service();
    let ctx = RequestContext::new();

    let (_, created) = svc.create_project(&ctx, project("u7")).await.unwrap();
    let fetched = svc.get_project(&ctx, &Id::parse(&created.id).unwrap()).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "Apollo");
    assert_eq!(fetched.description, "moon");
    assert_eq!(fetched.manager_id, "u7");
    assert_eq!(fetched.started_at, "2023-12-31");
    assert_eq!(fetched.finished_at, "2024-02-29");
}

#[tokio::test]
async fn test_boundary_dates_round_trip() {
    let svc = service();
    let ctx = RequestContext::new();

    let (_, created) = svc.create_task(&ctx, task("u1", "p1")).await.unwrap();
    let fetched = svc.get_task(&ctx, &Id::parse(&created.id).unwrap()).await.unwrap();
    assert_eq!(fetched.created_at, "2024-02-29");

    let (_, created) = svc.create_project(&ctx, project("u1")).await.unwrap();
    let fetched = svc.get_project(&ctx, &Id::parse(&created.id).unwrap()).await.unwrap();
    assert_eq!(fetched.started_at, "2023-12-31");
}

#[tokio::test]
async fn test_update_overwrites_only_supplied_fields() {
    let svc = service();
    let ctx = RequestContext::new();
    let (_, before) = svc.create_task(&ctx, task("u1", "p1")).await.unwrap();
    let id = Id::parse(&before.id).unwrap();

    let req = UpdateTaskRequest {
        title: Some("Ship hotfix".into()),
        status: Some("done".into()),
        project_id: Some("p2".into()),
        description: Some("  ".into()),
        ..Default::default()
    };
    svc.update_task(&ctx, &id, req).await.unwrap();
    let after = svc.get_task(&ctx, &id).await.unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.title, "Ship hotfix");
    assert_eq!(after.status, "done");
    assert_eq!(after.project_id, "p2");
    assert_eq!(after.author_id, "u1");
    assert_eq!(after.description, before.description);
    assert_eq!(after.priority, before.priority);
}

#[tokio::test]
async fn test_user_update_keeps_registration_date() {
    let svc = service();
    let ctx = RequestContext::new();
    let (_, before) = svc.create_user(&ctx, ann()).await.unwrap();
    let id = Id::parse(&before.id).unwrap();

    let req = UpdateUserRequest {
        email: Some("ann@y.com".into()),
        ..Default::default()
    };
    svc.update_user(&ctx, &id, req).await.unwrap();
    let after = svc.get_user(&ctx, &id).await.unwrap();

    assert_eq!(after.email, "ann@y.com");
    assert_eq!(after.registration_date, before.registration_date);
    assert_eq!(after.name, before.name);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let svc = service();
    let ctx = RequestContext::new();
    let (_, created) = svc.create_project(&ctx, project("u1")).await.unwrap();
    let id = Id::parse(&created.id).unwrap();

    svc.delete_project(&ctx, &id).await.unwrap();
    assert!(matches!(
        svc.get_project(&ctx, &id).await,
        Err(AppError::NotFound(Resource::Project))
    ));
    assert!(matches!(
        svc.delete_project(&ctx, &id).await,
        Err(AppError::NotFound(Resource::Project))
    ));
}

#[tokio::test]
async fn test_empty_value_rejected_for_every_filter() {
    let svc = service();
    let ctx = RequestContext::new();

    for filter in ["name", "email", "role", "unknown"] {
        assert!(matches!(
            svc.search_users(&ctx, filter, "").await,
            Err(AppError::Search(SearchError::EmptyValue))
        ));
    }
    for filter in ["title", "priority", "status", "author_id", "project_id", "unknown"] {
        assert!(matches!(
            svc.search_tasks(&ctx, filter, "").await,
            Err(AppError::Search(SearchError::EmptyValue))
        ));
    }
    for filter in ["title", "manager_id", "unknown"] {
        assert!(matches!(
            svc.search_projects(&ctx, filter, "").await,
            Err(AppError::Search(SearchError::EmptyValue))
        ));
    }
}

#[tokio::test]
async fn test_list_matches_stored_set() {
    let svc = service();
    let ctx = RequestContext::new();
    let mut expected = HashSet::new();
    for _ in 0..3 {
        let (_, user) = svc.create_user(&ctx, ann()).await.unwrap();
        expected.insert(user.id);
    }
    let (_, removed) = svc.create_user(&ctx, ann()).await.unwrap();
    svc.delete_user(&ctx, &Id::parse(&removed.id).unwrap()).await.unwrap();

    let listed = svc.list_users(&ctx).await.unwrap();
    let ids: HashSet<String> = listed.iter().map(|u| u.id.clone()).collect();

    assert_eq!(listed.len(), ids.len());
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_search_and_nested_listings() {
    let svc = service();
    let ctx = RequestContext::new();
    let (_, user) = svc.create_user(&ctx, ann()).await.unwrap();
    let (_, apollo) = svc.create_project(&ctx, project(&user.id)).await.unwrap();

    svc.create_task(&ctx, task(&user.id, &apollo.id)).await.unwrap();
    svc.create_task(&ctx, task(&user.id, "p-other")).await.unwrap();
    svc.create_task(&ctx, task("u-other", &apollo.id)).await.unwrap();

    let by_author = svc.list_user_tasks(&ctx, &Id::parse(&user.id).unwrap()).await.unwrap();
    assert_eq!(by_author.len(), 2);

    let by_project = svc
        .list_project_tasks(&ctx, &Id::parse(&apollo.id).unwrap())
        .await
        .unwrap();
    assert_eq!(by_project.len(), 2);

    let managed = svc.search_projects(&ctx, "manager_id", &user.id).await.unwrap();
    assert_eq!(managed.len(), 1);

    let titled = svc.search_tasks(&ctx, "title", "release").await.unwrap();
    assert_eq!(titled.len(), 3);

    let missing = svc.search_users(&ctx, "name", "Zed").await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_cancelled_request_is_reported() {
    let svc = service();
    let ctx = RequestContext::new();
    ctx.cancellation().cancel();

    let err = svc.list_projects(&ctx).await.unwrap_err();
    assert!(matches!(err, AppError::Cancelled(_)));
}
