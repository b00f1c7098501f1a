#![allow(clippy::unwrap_used, clippy::expect_used)]

use user_registry_sdk::{NewUser, User, UserUpdate};

use crate::api::rest::dto::{EmailQuery, UserDto, UserReq};

#[test]
fn user_dto_serializes_pascal_case() {
    let dto = UserDto::from(User {
        id: 7,
        name: "Test".to_owned(),
        email: "test@email.com".to_owned(),
    });
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "Id": 7, "Name": "Test", "Email": "test@email.com" })
    );
}

#[test]
fn user_req_accepts_lowercase_keys_and_missing_fields() {
    let req: UserReq =
        serde_json::from_str(r#"{"name":"Test","email":"test@email.com"}"#).unwrap();
    assert_eq!(req.id, None);
    let new_user: NewUser = req.into();
    assert_eq!(new_user, NewUser::new("Test", "test@email.com"));

    let req: UserReq = serde_json::from_str(r#"{"Name":null}"#).unwrap();
    let new_user: NewUser = req.into();
    assert_eq!(new_user.name, "");
    assert_eq!(new_user.email, "");
}

#[test]
fn user_req_carries_id_into_update_only() {
    let req: UserReq =
        serde_json::from_str(r#"{"Id":3,"Name":"Updated","Email":"new@email.com"}"#).unwrap();
    let update: UserUpdate = req.clone().into();
    assert_eq!(update.target_id(), Some(3));
    assert_eq!(update.email, "new@email.com");

    let new_user: NewUser = req.into();
    assert_eq!(new_user.name, "Updated");
}

#[test]
fn email_query_accepts_both_spellings() {
    let q: EmailQuery = serde_urlencoded::from_str("Email=test%40email.com").unwrap();
    assert_eq!(q.email, "test@email.com");
    let q: EmailQuery = serde_urlencoded::from_str("email=a%2Bb@x.io").unwrap();
    assert_eq!(q.email, "a+b@x.io");
    assert!(serde_urlencoded::from_str::<EmailQuery>("").is_err());
}
