//! Project database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::{DomainError, Id, Project};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub manager_id: String,
    pub started_at: Date,
    pub finished_at: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn corrupt(e: DomainError) -> AppError {
    AppError::storage(format!("corrupt project row: {}", e))
}

impl TryFrom<Model> for Project {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Project {
            id: Id::parse(&model.id).map_err(corrupt)?,
            title: model.title,
            description: model.description,
            manager_id: Id::parse(&model.manager_id).map_err(corrupt)?,
            started_at: model.started_at.into(),
            finished_at: model.finished_at.into(),
        })
    }
}

impl From<Project> for ActiveModel {
    fn from(project: Project) -> Self {
        ActiveModel {
            id: Set(project.id.into_inner()),
            title: Set(project.title),
            description: Set(project.description),
            manager_id: Set(project.manager_id.into_inner()),
            started_at: Set(project.started_at.into()),
            finished_at: Set(project.finished_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::CreateProjectRequest;
    use sea_orm::TryIntoModel;

    fn project() -> Project {
        Project::from_request(
            Id::parse("p1").unwrap(),
            CreateProjectRequest {
                title: "Apollo".into(),
                description: "moon".into(),
                manager_id: "u7".into(),
                started_at: "2023-12-31".into(),
                finished_at: "2024-02-29".into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_row_round_trip_keeps_dates() {
        let original = project();
        let row = ActiveModel::from(original.clone()).try_into_model().unwrap();
        assert_eq!(row.started_at, Date::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(row.finished_at, Date::from_ymd_opt(2024, 2, 29).unwrap());

        assert_eq!(Project::try_from(row).unwrap(), original);
    }

    #[test]
    fn test_malformed_manager_id_is_storage_error() {
        let mut row = ActiveModel::from(project()).try_into_model().unwrap();
        row.manager_id = "not an id".into();
        assert!(matches!(Project::try_from(row), Err(AppError::Storage(_))));
    }
}
