//! # Classhub Models
//!
//! Domain models and DTOs for the Classhub API.
//!
//! Every entity serializes its primary key as `_id` and uses camelCase
//! field names on the wire.
//!
//! # Modules
//!
//! - [`auth`]: token request/response bodies
//! - [`users`]: users and the closed [`UserRole`] enumeration
//! - [`classes`]: classes, moderation status and instructor DTOs
//! - [`carts`]: cart items
//! - [`enrollments`]: enrollment records
//! - [`payments`]: payment records, purchase and payment-intent DTOs
//! - [`results`]: storage acknowledgments returned by mutating endpoints

pub mod auth;
pub mod carts;
pub mod classes;
pub mod enrollments;
pub mod payments;
pub mod results;
pub mod users;

pub use auth::{TokenRequest, TokenResponse};
pub use carts::{AddToCartDto, CartItem, NewCartItem};
pub use classes::{
    Class, ClassChanges, ClassFilter, ClassFilterParams, ClassStatus, CreateClassDto,
    ModerateClassDto, NewClass, PublicClassParams, UpdateClassDto,
};
pub use enrollments::Enrollment;
pub use payments::{
    PaymentIntentRequest, PaymentIntentResponse, PaymentRecord, Purchase, PurchaseDto,
    PurchaseReceipt,
};
pub use results::{
    DeleteResult, ExistsResponse, InsertOutcome, InsertResponse, InsertResult, UpdateResult,
};
pub use users::{
    CreateUserDto, NewUser, RoleResponse, UpdateRoleDto, User, UserFilterParams, UserRole,
};
