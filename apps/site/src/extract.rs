use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejection renders as a 400 `INVALID_JSON` error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
