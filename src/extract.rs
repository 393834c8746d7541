//! Path and query extractors that reject with the JSON error body.
//!
//! Axum's own `Path` and `Query` reject with plain text; these wrap them
//! and turn the rejection into a 400 [`AppError`].

use anyhow::anyhow;
use axum::{
    extract::{
        FromRequestParts, Path, Query,
        rejection::{PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use classhub_core::AppError;

fn path_message(rejection: &PathRejection) -> String {
    match rejection {
        PathRejection::FailedToDeserializePathParams(err) => err.body_text(),
        _ => "Invalid URL".to_string(),
    }
}

fn query_message(rejection: &QueryRejection) -> String {
    let body = rejection.body_text();
    if body.contains("unknown variant") {
        return format!(
            "Invalid query parameter: {}",
            body.rsplit(": ").next().unwrap_or(&body)
        );
    }
    body
}

/// Like [`Path`], with a JSON 400 on malformed segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected path parameters");
                AppError::bad_request(anyhow!(path_message(&rejection)))
            })?;
        Ok(ValidPath(value))
    }
}

/// Like [`Query`], with a JSON 400 on unparsable query strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected query string");
                AppError::bad_request(anyhow!(query_message(&rejection)))
            })?;
        Ok(ValidQuery(value))
    }
}
