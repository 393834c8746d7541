//! # Classhub Config
//!
//! Configuration types for the Classhub API, loaded from environment
//! variables at startup.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`payment`]: payment provider credentials
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use classhub_config::{CorsConfig, JwtConfig, PaymentConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! println!("listening on {}", server_config.bind_address());
//! ```

pub mod cors;
pub mod jwt;
pub mod payment;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use payment::PaymentConfig;
pub use server::ServerConfig;
