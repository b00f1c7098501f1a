use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Json, Query};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::field::Empty;
use tracing::info;

use crate::api::rest::dto::{EmailQuery, UserDto, UserReq};
use crate::api::rest::error::{
    ApiResult, ErrorCode, domain_error_to_problem, extract_trace_id, json_rejection_to_problem,
    query_rejection_to_problem, update_error_to_problem,
};
use crate::domain::service::Service;

const USER_PATH: &str = "/User";

fn location_for(email: &str, trace_id: Option<String>) -> ApiResult<HeaderValue> {
    let location = serde_urlencoded::to_string([("Email", email)])
        .map_err(|e| e.to_string())
        .and_then(|query| {
            HeaderValue::from_str(&format!("{USER_PATH}?{query}")).map_err(|e| e.to_string())
        });
    location.map_err(|e| {
        tracing::error!(error = %e, "failed to build Location header");
        ErrorCode::Internal.with_context("Failed to build Location header", USER_PATH, trace_id)
    })
}

/// Create a user; responds 201 with the stored record and its `Location`.
#[tracing::instrument(skip(svc, headers, payload), fields(user.email = Empty, user.id = Empty))]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
    payload: Result<Json<UserReq>, JsonRejection>,
) -> ApiResult<Response> {
    let trace_id = extract_trace_id(&headers);
    let Json(req) =
        payload.map_err(|e| json_rejection_to_problem(&e, USER_PATH, trace_id.clone()))?;
    if let Some(email) = req.email.as_deref() {
        tracing::Span::current().record("user.email", email);
    }

    let user = svc
        .create_user(req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, USER_PATH, trace_id.clone()))?;
    tracing::Span::current().record("user.id", user.id);
    info!("user created");

    let location = location_for(&user.email, trace_id)?;
    let mut resp = (StatusCode::CREATED, Json(UserDto::from(user))).into_response();
    resp.headers_mut().insert(header::LOCATION, location);
    Ok(resp)
}

/// Fetch the user stored under `?Email=`.
#[tracing::instrument(skip(svc, headers, query), fields(user.email = Empty))]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<UserDto>> {
    let trace_id = extract_trace_id(&headers);
    let Query(q) = query.map_err(|e| query_rejection_to_problem(&e, USER_PATH, trace_id.clone()))?;
    tracing::Span::current().record("user.email", q.email.as_str());

    let user = svc
        .get_user_by_email(&q.email)
        .await
        .map_err(|e| domain_error_to_problem(&e, USER_PATH, trace_id))?;
    Ok(Json(UserDto::from(user)))
}

/// Replace name and email of the user identified by a stored `Id`, else by `Email`.
#[tracing::instrument(skip(svc, headers, payload), fields(user.email = Empty, user.id = Empty))]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
    payload: Result<Json<UserReq>, JsonRejection>,
) -> ApiResult<Json<UserDto>> {
    let trace_id = extract_trace_id(&headers);
    let Json(req) =
        payload.map_err(|e| json_rejection_to_problem(&e, USER_PATH, trace_id.clone()))?;
    if let Some(email) = req.email.as_deref() {
        tracing::Span::current().record("user.email", email);
    }
    if let Some(id) = req.id {
        tracing::Span::current().record("user.id", id);
    }

    let user = svc
        .update_user(req.into())
        .await
        .map_err(|e| update_error_to_problem(&e, USER_PATH, trace_id))?;
    info!("user updated");
    Ok(Json(UserDto::from(user)))
}

/// Delete the user stored under `?Email=`; responds 204.
#[tracing::instrument(skip(svc, headers, query), fields(user.email = Empty))]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<StatusCode> {
    let trace_id = extract_trace_id(&headers);
    let Query(q) = query.map_err(|e| query_rejection_to_problem(&e, USER_PATH, trace_id.clone()))?;
    tracing::Span::current().record("user.email", q.email.as_str());

    svc.delete_user_by_email(&q.email)
        .await
        .map_err(|e| domain_error_to_problem(&e, USER_PATH, trace_id))?;
    info!("user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Readiness: 200 once the store answers a ping, 503 otherwise.
#[tracing::instrument(skip(svc, headers))]
pub async fn health(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
) -> ApiResult<Json<serde_json::Value>> {
    svc.health().await.map_err(|e| {
        tracing::error!(error = %e, "health check failed");
        ErrorCode::ServiceUnavailable.with_context(
            "Database is not reachable",
            "/health",
            extract_trace_id(&headers),
        )
    })?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// Liveness check.
#[allow(clippy::unused_async)]
pub async fn healthz() -> &'static str {
    "ok"
}
