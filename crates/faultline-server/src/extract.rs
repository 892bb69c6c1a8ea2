//! Extractors whose rejections are rendered by the error boundary
//!
//! Drop-in replacements for `axum::Json` and `axum::extract::Path`. A
//! rejection becomes a [`DomainError`] with the rejection's status and
//! message, so the client gets the same `ErrorBody` as for any other failure.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use faultline_core::DomainError;
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::AppError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(request, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejected(rejection)),
        }
    }
}

/// Path parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejected(rejection)),
        }
    }
}

fn json_rejected(rejection: JsonRejection) -> AppError {
    DomainError::new(rejection.status().as_u16(), rejection.body_text())
        .with_source(rejection)
        .into()
}

fn path_rejected(rejection: PathRejection) -> AppError {
    DomainError::new(rejection.status().as_u16(), rejection.body_text())
        .with_source(rejection)
        .into()
}
