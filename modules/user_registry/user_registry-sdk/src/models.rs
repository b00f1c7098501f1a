//! Public models for the `user_registry` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the `user_registry` module and its consumers.

/// A registered user.
///
/// `id` is assigned by the store and is strictly positive once persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Full replacement of a stored user's `name` and `email`.
///
/// The target record is identified by `id` when present and positive,
/// otherwise by `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

impl UserUpdate {
    /// Replacement that targets the record currently stored under `email`.
    pub fn by_email(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Replacement that targets the record with the given `id`, falling back
    /// to the record stored under `email` when that id is unknown.
    /// Allows changing the email as well.
    pub fn by_id(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            email: email.into(),
        }
    }

    /// The id to target, if the update carries a usable one.
    #[must_use]
    pub fn target_id(&self) -> Option<i64> {
        self.id.filter(|id| *id > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_id_ignores_unassigned_ids() {
        assert_eq!(UserUpdate::by_id(0, "a", "a@b.co").target_id(), None);
        assert_eq!(UserUpdate::by_id(-3, "a", "a@b.co").target_id(), None);
        assert_eq!(UserUpdate::by_email("a", "a@b.co").target_id(), None);
        assert_eq!(UserUpdate::by_id(7, "a", "a@b.co").target_id(), Some(7));
    }
}
