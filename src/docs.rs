use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use classhub_auth::Claims;
use classhub_models::{
    AddToCartDto, CartItem, Class, ClassFilterParams, ClassStatus, CreateClassDto,
    CreateUserDto, DeleteResult, Enrollment, ExistsResponse, InsertResponse, InsertResult,
    ModerateClassDto, PaymentIntentRequest, PaymentIntentResponse, PaymentRecord,
    PublicClassParams, PurchaseDto, RoleResponse, TokenRequest, TokenResponse, UpdateClassDto,
    UpdateResult, UpdateRoleDto, User, UserFilterParams, UserRole,
};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::issue_token,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user_role,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::update_user_role,
        crate::modules::users::controller::delete_user,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::get_popular_classes,
        crate::modules::classes::controller::get_instructor_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_my_classes,
        crate::modules::classes::controller::get_my_class,
        crate::modules::classes::controller::update_my_class,
        crate::modules::classes::controller::delete_my_class,
        crate::modules::classes::controller::get_all_classes,
        crate::modules::classes::controller::moderate_class,
        crate::modules::instructors::controller::get_instructors,
        crate::modules::instructors::controller::get_instructor,
        crate::modules::carts::controller::add_to_cart,
        crate::modules::carts::controller::remove_from_cart,
        crate::modules::carts::controller::get_cart,
        crate::modules::payments::controller::create_payment_intent,
        crate::modules::payments::controller::create_payment,
        crate::modules::payments::controller::get_payments,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::get_enrollments,
    ),
    components(
        schemas(
            Claims,
            TokenRequest,
            TokenResponse,
            User,
            UserRole,
            CreateUserDto,
            UpdateRoleDto,
            UserFilterParams,
            RoleResponse,
            Class,
            ClassStatus,
            CreateClassDto,
            UpdateClassDto,
            ModerateClassDto,
            PublicClassParams,
            ClassFilterParams,
            CartItem,
            AddToCartDto,
            Enrollment,
            PaymentRecord,
            PurchaseDto,
            PaymentIntentRequest,
            PaymentIntentResponse,
            InsertResult,
            InsertResponse,
            ExistsResponse,
            UpdateResult,
            DeleteResult,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session token issuing"),
        (name = "Users", description = "Registration and role lookup"),
        (name = "Classes", description = "Public class catalogue"),
        (name = "Instructors", description = "Instructor directory"),
        (name = "Instructor", description = "Class management for instructors"),
        (name = "Carts", description = "Shopping cart of the caller"),
        (name = "Payments", description = "Checkout and payment history"),
        (name = "Enrollments", description = "Classes the caller has purchased"),
        (name = "Admin", description = "User and class moderation")
    ),
    info(
        title = "Classhub API",
        version = "0.1.0",
        description = "Course marketplace API built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
