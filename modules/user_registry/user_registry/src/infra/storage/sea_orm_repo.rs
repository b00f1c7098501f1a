use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use user_registry_sdk::{NewUser, User, UserUpdate};

use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::infra::storage::db::{db_err, is_unique_violation};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

/// ORM-based implementation of the `UsersRepository` trait.
///
/// Email uniqueness is enforced by the `idx_users_email` unique index, so two
/// concurrent writers racing for the same address cannot both succeed.
#[derive(Clone)]
pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn write_err(e: DbErr, email: &str) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::email_already_exists(email)
    } else {
        db_err(e)
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let m = UserAM {
            id: NotSet,
            name: Set(new_user.name.clone()),
            email: Set(new_user.email.clone()),
        };

        let saved = m
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, &new_user.email))?;
        Ok(saved.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn replace(&self, update: &UserUpdate) -> Result<User, DomainError> {
        let by_id = match update.target_id() {
            Some(id) => UserEntity::find_by_id(id).one(&self.db).await.map_err(db_err)?,
            None => None,
        };
        // An unknown id still resolves through the email.
        let existing = match by_id {
            Some(found) => Some(found),
            None => UserEntity::find()
                .filter(Column::Email.eq(update.email.as_str()))
                .one(&self.db)
                .await
                .map_err(db_err)?,
        };

        let Some(existing) = existing else {
            return Err(DomainError::user_not_found(update.email.clone()));
        };

        let m = UserAM {
            id: Unchanged(existing.id),
            name: Set(update.name.clone()),
            email: Set(update.email.clone()),
        };

        // The row may vanish between the lookup and the write.
        match m.update(&self.db).await {
            Ok(saved) => Ok(saved.into()),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::user_not_found(update.email.clone())),
            Err(e) => Err(write_err(e, &update.email)),
        }
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let result = UserEntity::delete_many()
            .filter(Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.db.ping().await.map_err(db_err)
    }
}
