//! Request authentication and authorization.
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor and the
//!   `require_auth` layer
//! - [`role`]: `require_admin` / `require_instructor` layers
//!
//! Routers apply these with `route_layer`, so unmatched paths still 404
//! instead of 401:
//!
//! ```ignore
//! init_carts_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
//! ```

pub mod auth;
pub mod role;
