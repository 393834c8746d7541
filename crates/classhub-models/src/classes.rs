use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Moderation status of a class.
///
/// New classes start as `pending`; admins move them to `active` or
/// `denied` and may flip between those freely. Only `active` classes are
/// listed publicly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Pending,
    Active,
    Denied,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Pending => "pending",
            ClassStatus::Active => "active",
            ClassStatus::Denied => "denied",
        }
    }
}

impl std::fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub info: Option<String>,
    pub price: f64,
    /// Remaining capacity
    pub seats: i32,
    pub enrolled: i32,
    pub difficulty: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: String,
    pub status: ClassStatus,
    pub feedback: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `POST /classes`. The owner is always the authenticated
/// instructor, never a field of the body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub image: Option<String>,
    pub info: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "seats must not be negative"))]
    pub seats: i32,
    pub difficulty: Option<String>,
    pub instructor_name: Option<String>,
}

/// Body of `PATCH /myclasses/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "seats must not be negative"))]
    pub seats: Option<i32>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    pub info: Option<String>,
}

/// Body of `POST /allclasses/{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ModerateClassDto {
    pub status: ClassStatus,
    pub feedback: Option<String>,
}

/// Query parameters for `GET /classes`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct PublicClassParams {
    pub difficulty: Option<String>,
}

/// Query parameters for `GET /allclasses`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct ClassFilterParams {
    pub status: Option<ClassStatus>,
}

/// Store-level filter. Every `None` field matches all rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassFilter {
    pub status: Option<ClassStatus>,
    pub difficulty: Option<String>,
    pub instructor_email: Option<String>,
}

impl ClassFilter {
    pub fn active() -> Self {
        Self {
            status: Some(ClassStatus::Active),
            ..Self::default()
        }
    }

    pub fn matches(&self, class: &Class) -> bool {
        self.status.is_none_or(|s| class.status == s)
            && self
                .difficulty
                .as_deref()
                .is_none_or(|d| class.difficulty.as_deref() == Some(d))
            && self
                .instructor_email
                .as_deref()
                .is_none_or(|e| class.instructor_email == e)
    }
}

/// Insert payload for the class store.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub image: Option<String>,
    pub info: Option<String>,
    pub price: f64,
    pub seats: i32,
    pub difficulty: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: String,
}

impl NewClass {
    pub fn from_dto(dto: CreateClassDto, instructor_email: &str) -> Self {
        Self {
            name: dto.name,
            image: dto.image,
            info: dto.info,
            price: dto.price,
            seats: dto.seats,
            difficulty: dto.difficulty,
            instructor_name: dto.instructor_name,
            instructor_email: instructor_email.to_string(),
        }
    }
}

/// Partial update applied by the class store.
pub type ClassChanges = UpdateClassDto;
