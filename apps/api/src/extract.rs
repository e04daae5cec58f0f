use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// `Json<T>` whose rejection is an `AppError::Validation`, so malformed bodies
/// come back as 400 with the standard error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidatedJson<T>(pub T);

/// `Path<T>` with the same `AppError` rejection as [`ValidatedJson`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ValidatedPath<T>(pub T);
