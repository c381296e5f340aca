//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::{DomainError, Id, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub registration_date: Date,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn corrupt(e: DomainError) -> AppError {
    AppError::storage(format!("corrupt user row: {}", e))
}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: Id::parse(&model.id).map_err(corrupt)?,
            name: model.name,
            email: model.email,
            registration_date: model.registration_date.into(),
            role: model.role.parse().map_err(corrupt)?,
        })
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: Set(user.id.into_inner()),
            name: Set(user.name),
            email: Set(user.email),
            registration_date: Set(user.registration_date.into()),
            role: Set(user.role.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::CreateUserRequest;
    use sea_orm::TryIntoModel;

    fn user(registration_date: &str) -> User {
        User::from_request(
            Id::parse("u1").unwrap(),
            CreateUserRequest {
                name: "Ann".into(),
                email: "ann@x.com".into(),
                registration_date: registration_date.into(),
                role: "manager".into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_row_round_trip_keeps_dates() {
        for (raw, expected) in [
            ("2024-02-29", Date::from_ymd_opt(2024, 2, 29).unwrap()),
            ("2023-12-31", Date::from_ymd_opt(2023, 12, 31).unwrap()),
        ] {
            let original = user(raw);
            let row = ActiveModel::from(original.clone()).try_into_model().unwrap();
            assert_eq!(row.registration_date, expected);
            assert_eq!(User::try_from(row).unwrap(), original);
        }
    }

    #[test]
    fn test_unknown_role_is_storage_error() {
        let mut row = ActiveModel::from(user("2024-01-01")).try_into_model().unwrap();
        row.role = "owner".into();
        assert!(matches!(User::try_from(row), Err(AppError::Storage(_))));
    }
}
