use serde::{Deserialize, Serialize};
use user_registry_sdk::{NewUser, User, UserUpdate};

/// REST DTO for user representation: `{"Id": .., "Name": .., "Email": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserDto {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "email")]
    pub email: String,
}

/// REST DTO for create and update bodies.
///
/// Every field is optional on the wire; a missing or null `Name`/`Email`
/// reaches validation as an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserReq {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, alias = "name")]
    pub name: Option<String>,
    #[serde(default, alias = "email")]
    pub email: Option<String>,
}

/// `?Email=...` selector for get and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailQuery {
    #[serde(rename = "Email", alias = "email")]
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
        }
    }
}

// Any client-supplied Id is ignored on create.
impl From<UserReq> for NewUser {
    fn from(req: UserReq) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
        }
    }
}

impl From<UserReq> for UserUpdate {
    fn from(req: UserReq) -> Self {
        Self {
            id: req.id,
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
        }
    }
}
