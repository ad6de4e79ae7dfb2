//! Request extractors that reject with the standard error envelope.
//!
//! Axum's built-in `Json`, `Path`, and `Query` rejections render as plain
//! text. These wrappers map them into [`AppError::BadRequest`] and, for
//! bodies, run `validator` rules before the handler sees the value.
//!
//! Mutating handlers take the body as `Result<ValidatedJson<T>, AppError>`
//! and unwrap it after the permission check, so a caller without the
//! permission gets 403 whatever the body holds.

use std::fmt;

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Deserialize;
use taskhub_core::types::DbId;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and validated.
///
/// Deserialization failures yield `400 BAD_REQUEST`; rule failures yield
/// `400 VALIDATION_ERROR` with field-level details.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path parameters with an enveloped rejection.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ApiPath(value))
    }
}

/// A resource id taken from the URL. Zero and negative ids are rejected
/// while the path is parsed, so they never reach a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub DbId);

struct PathIdVisitor;

impl<'de> Visitor<'de> for PathIdVisitor {
    type Value = PathId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a positive integer id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PathId, E> {
        if v < 1 {
            return Err(E::custom(format!("id must be a positive integer, got {v}")));
        }
        Ok(PathId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PathId, E> {
        match DbId::try_from(v) {
            Ok(id) => self.visit_i64(id),
            Err(_) => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for PathId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_i64(PathIdVisitor)
    }
}

/// Query string with an enveloped rejection.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}
