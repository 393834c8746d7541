use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use classhub_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::middleware::role::{require_admin, require_instructor};
use crate::modules::auth::router::init_auth_router;
use crate::modules::carts::router::init_carts_router;
use crate::modules::classes::router::{
    init_classes_router, init_instructor_classes_router, init_moderation_router,
};
use crate::modules::enrollments::router::init_enrollments_router;
use crate::modules::instructors::router::init_instructors_router;
use crate::modules::payments::router::init_payments_router;
use crate::modules::users::router::{init_users_admin_router, init_users_router};
use crate::state::AppState;

async fn root() -> &'static str {
    "Hello World"
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // Credentials cannot be combined with a wildcard origin.
    if config.allows_any() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer
        .allow_origin(allowed_origins)
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .merge(init_auth_router())
        .merge(init_users_router())
        .merge(init_classes_router())
        .merge(init_instructors_router());

    let authenticated = Router::new()
        .merge(init_carts_router())
        .merge(init_payments_router())
        .merge(init_enrollments_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let instructor = init_instructor_classes_router().route_layer(
        middleware::from_fn_with_state(state.clone(), require_instructor),
    );

    let admin = Router::new()
        .merge(init_users_admin_router())
        .merge(init_moderation_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(public)
        .merge(authenticated)
        .merge(instructor)
        .merge(admin)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware))
}
