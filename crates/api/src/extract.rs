//! Extractors whose rejections render through [`AppError`].
//!
//! Axum's stock `Json`/`Query`/`Path` rejections are plain text; these wrappers keep
//! malformed bodies and unrecognized fields inside the `{error, code}` shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor. Unknown fields and type mismatches become `BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor with the same rejection shape as [`ApiJson`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path-parameter extractor; a non-numeric id is `BAD_REQUEST`, not plain text.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
