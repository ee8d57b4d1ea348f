//! Tenant Resolution
//!
//! Identity itself is an external collaborator; this module only extracts
//! the already-authenticated tenant from the request. Handlers that require
//! a tenant take [`TenantId`]; the public reservation endpoint takes
//! `Option<TenantId>` and falls back to an explicit tenant id in the body
//! (public booking links).

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::utils::AppError;

pub const TENANT_HEADER: &str = "x-tenant-id";

/// The tenant a request operates on
#[derive(Debug, Clone)]
pub struct TenantId(pub String);

fn tenant_from_parts(parts: &Parts) -> Option<TenantId> {
    parts
        .headers
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| TenantId(v.to_string()))
}

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        tenant_from_parts(parts).ok_or(AppError::Unauthorized)
    }
}

impl<S> OptionalFromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(tenant_from_parts(parts))
    }
}
