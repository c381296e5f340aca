//! Task database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::{DomainError, Id, Task};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: Date,
    pub done_at: Date,
    pub author_id: String,
    pub project_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn corrupt(e: DomainError) -> AppError {
    AppError::storage(format!("corrupt task row: {}", e))
}

impl TryFrom<Model> for Task {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Task {
            id: Id::parse(&model.id).map_err(corrupt)?,
            title: model.title,
            description: model.description,
            priority: model.priority.parse().map_err(corrupt)?,
            status: model.status.parse().map_err(corrupt)?,
            created_at: model.created_at.into(),
            done_at: model.done_at.into(),
            author_id: Id::parse(&model.author_id).map_err(corrupt)?,
            project_id: Id::parse(&model.project_id).map_err(corrupt)?,
        })
    }
}

impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Set(task.id.into_inner()),
            title: Set(task.title),
            description: Set(task.description),
            priority: Set(task.priority.to_string()),
            status: Set(task.status.to_string()),
            created_at: Set(task.created_at.into()),
            done_at: Set(task.done_at.into()),
            author_id: Set(task.author_id.into_inner()),
            project_id: Set(task.project_id.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::CreateTaskRequest;
    use sea_orm::TryIntoModel;

    fn task() -> Task {
        Task::from_request(
            Id::parse("t1").unwrap(),
            CreateTaskRequest {
                title: "Ship release".into(),
                description: "tag and publish".into(),
                priority: "high".into(),
                status: "in_progress".into(),
                created_at: "2023-12-31".into(),
                done_at: "2024-02-29".into(),
                author_id: "u1".into(),
                project_id: "p1".into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_row_round_trip_keeps_dates() {
        let original = task();
        let row = ActiveModel::from(original.clone()).try_into_model().unwrap();
        assert_eq!(row.created_at, Date::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(row.done_at, Date::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(row.status, "in_progress");

        assert_eq!(Task::try_from(row).unwrap(), original);
    }

    #[test]
    fn test_unknown_status_is_storage_error() {
        let mut row = ActiveModel::from(task()).try_into_model().unwrap();
        row.status = "blocked".into();
        assert!(matches!(Task::try_from(row), Err(AppError::Storage(_))));
    }
}
