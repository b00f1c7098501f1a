use crate::infra::storage::entity::Model as UserEntity;
use user_registry_sdk::User;

/// Convert a database entity to a contract model
impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
        }
    }
}
