//! User models.
//!
//! A user is identified by email. The role is a closed set: unset
//! (`null`), `instructor` or `admin`. Anything else is rejected at the
//! deserialization boundary, both from request bodies and from storage.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Instructor,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instructor" => Ok(UserRole::Instructor),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Option<UserRole>,
    /// Free-form profile fields submitted at registration
    #[schema(value_type = Object)]
    pub profile: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Registration body for `POST /users`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(alias = "photo")]
    pub photo_url: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub profile: Option<serde_json::Value>,
    /// Any other submitted fields (phone, gender, address, ...)
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Insert payload for the user store. New users never carry a role.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub profile: serde_json::Value,
}

impl From<CreateUserDto> for NewUser {
    /// Extra top-level fields land in `profile`. Keys of an explicit
    /// `profile` object win over them, and a `role` key is never kept.
    fn from(dto: CreateUserDto) -> Self {
        let mut profile = dto.extra;
        profile.remove("role");
        match dto.profile {
            Some(serde_json::Value::Object(explicit)) => profile.extend(explicit),
            Some(serde_json::Value::Null) | None => {}
            Some(other) => {
                profile.insert("profile".to_string(), other);
            }
        }

        Self {
            email: dto.email,
            name: dto.name,
            photo_url: dto.photo_url,
            profile: serde_json::Value::Object(profile),
        }
    }
}

/// Body of `PATCH /users/{id}`. A `null` role clears it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleDto {
    pub role: Option<UserRole>,
}

/// Query parameters for `GET /users`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct UserFilterParams {
    pub role: Option<UserRole>,
}

/// Response of `GET /users/role/{email}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Instructor).unwrap(),
            r#""instructor""#
        );
        let role: UserRole = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(serde_json::from_str::<UserRole>(r#""superuser""#).is_err());
        assert!("superuser".parse::<UserRole>().is_err());
        assert_eq!("instructor".parse::<UserRole>(), Ok(UserRole::Instructor));
    }

    #[test]
    fn test_update_role_accepts_null() {
        let dto: UpdateRoleDto = serde_json::from_str(r#"{"role":null}"#).unwrap();
        assert!(dto.role.is_none());
    }

    #[test]
    fn test_user_serializes_id_as_underscore_id() {
        let user = User {
            id: Uuid::nil(),
            email: "a@x.com".to_string(),
            name: None,
            photo_url: None,
            role: Some(UserRole::Admin),
            profile: serde_json::json!({}),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["_id"], Uuid::nil().to_string());
        assert_eq!(json["role"], "admin");
        assert!(json.get("photoUrl").is_some());
    }

    #[test]
    fn test_new_user_defaults_profile() {
        let dto: CreateUserDto =
            serde_json::from_str(r#"{"email":"a@x.com","photo":"http://img"}"#).unwrap();
        let new_user = NewUser::from(dto);
        assert_eq!(new_user.photo_url.as_deref(), Some("http://img"));
        assert_eq!(new_user.profile, serde_json::json!({}));
    }

    #[test]
    fn test_new_user_keeps_extra_fields_in_profile() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"email":"s@x.com","name":"S","photo":"http://p","gender":"f","phone":"123",
                "role":"admin","profile":{"phone":"456"}}"#,
        )
        .unwrap();
        let new_user = NewUser::from(dto);
        assert_eq!(new_user.name.as_deref(), Some("S"));
        assert_eq!(new_user.photo_url.as_deref(), Some("http://p"));
        assert_eq!(
            new_user.profile,
            serde_json::json!({ "gender": "f", "phone": "456" })
        );
    }
}
