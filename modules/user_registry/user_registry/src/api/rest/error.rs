use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderMap, StatusCode};

use crate::api::rest::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, Problem>;

/// Error catalog for the REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserNotFound,
    UserEmailTaken,
    UserValidation,
    UserBadRequest,
    PayloadTooLarge,
    UnsupportedMediaType,
    UnprocessableBody,
    InternalDatabase,
    Internal,
    ServiceUnavailable,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserEmailTaken => "USER_EMAIL_TAKEN",
            Self::UserValidation => "USER_VALIDATION",
            Self::UserBadRequest => "USER_BAD_REQUEST",
            Self::PayloadTooLarge => "USER_PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType => "USER_UNSUPPORTED_MEDIA_TYPE",
            Self::UnprocessableBody => "USER_UNPROCESSABLE_BODY",
            Self::InternalDatabase => "USER_INTERNAL_DATABASE",
            Self::Internal => "USER_INTERNAL",
            Self::ServiceUnavailable => "USER_SERVICE_UNAVAILABLE",
        }
    }

    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UserEmailTaken | Self::UserValidation | Self::UserBadRequest => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnprocessableBody => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalDatabase | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::UserNotFound => "User Not Found",
            Self::UserEmailTaken => "Email Already Taken",
            Self::UserValidation => "Validation Failed",
            Self::UserBadRequest => "Bad Request",
            Self::PayloadTooLarge => "Payload Too Large",
            Self::UnsupportedMediaType => "Unsupported Media Type",
            Self::UnprocessableBody => "Unprocessable Entity",
            Self::InternalDatabase | Self::Internal => "Internal Server Error",
            Self::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Build a Problem for this code with the status and title from the catalog.
    pub fn with_context(
        self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        let p = Problem::new(self.status(), self.title(), detail)
            .with_type(format!("urn:user-registry:error:{}", self.as_str()))
            .with_code(self.as_str())
            .with_instance(instance);
        match trace_id {
            Some(id) => p.with_trace_id(id),
            None => p,
        }
    }
}

/// Trace id for a Problem: the request's `x-trace-id` or `x-request-id`,
/// falling back to the current span.
#[must_use]
pub fn extract_trace_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-trace-id")
        .or_else(|| headers.get("x-request-id"))
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .or_else(|| {
            tracing::Span::current()
                .id()
                .map(|id| id.into_u64().to_string())
        })
}

/// Map domain error to RFC9457 Problem using the catalog
pub fn domain_error_to_problem(
    e: &DomainError,
    instance: &str,
    trace_id: Option<String>,
) -> Problem {
    match e {
        DomainError::UserNotFound { key } => ErrorCode::UserNotFound.with_context(
            format!("No user found for '{key}'"),
            instance,
            trace_id,
        ),
        // The detail is the fixed, client-visible duplicate message.
        DomainError::EmailAlreadyExists { .. } => {
            ErrorCode::UserEmailTaken.with_context(e.to_string(), instance, trace_id)
        }
        DomainError::EmptyName
        | DomainError::NameTooLong { .. }
        | DomainError::EmptyEmail
        | DomainError::InvalidEmail { .. }
        | DomainError::EmailTooLong { .. } => {
            let problem =
                ErrorCode::UserValidation.with_context(e.to_string(), instance, trace_id);
            match e.field() {
                Some(field) => problem.with_errors(vec![ValidationViolation {
                    field: field.to_owned(),
                    message: e.to_string(),
                }]),
                None => problem,
            }
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ErrorCode::InternalDatabase.with_context(
                "An internal database error occurred",
                instance,
                trace_id,
            )
        }
    }
}

/// Update reports a missing target as a bad request rather than 404.
pub fn update_error_to_problem(
    e: &DomainError,
    instance: &str,
    trace_id: Option<String>,
) -> Problem {
    match e {
        DomainError::UserNotFound { key } => ErrorCode::UserBadRequest.with_context(
            format!("Cannot update: no user found for '{key}'"),
            instance,
            trace_id,
        ),
        other => domain_error_to_problem(other, instance, trace_id),
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/", None)
    }
}

/// Body rejections keep the extractor's status (400, 413, 415 or 422) under a
/// matching catalog code.
pub fn json_rejection_to_problem(
    rejection: &JsonRejection,
    instance: &str,
    trace_id: Option<String>,
) -> Problem {
    let code = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ErrorCode::PayloadTooLarge,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ErrorCode::UnsupportedMediaType,
        StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::UnprocessableBody,
        _ => ErrorCode::UserBadRequest,
    };
    code.with_context(rejection.body_text(), instance, trace_id)
}

pub fn query_rejection_to_problem(
    rejection: &QueryRejection,
    instance: &str,
    trace_id: Option<String>,
) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "rejected query string");
    ErrorCode::UserBadRequest.with_context(
        "Query parameter 'Email' is required",
        instance,
        trace_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_registry_sdk::EMAIL_TAKEN_MESSAGE;

    #[test]
    fn duplicate_email_uses_fixed_detail() {
        let e = DomainError::email_already_exists("a@b.co");
        let p = domain_error_to_problem(&e, "/User", None);
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.detail, EMAIL_TAKEN_MESSAGE);
        assert_eq!(p.code, "USER_EMAIL_TAKEN");
        assert_eq!(p.type_url, "urn:user-registry:error:USER_EMAIL_TAKEN");
        assert_eq!(p.instance, "/User");
    }

    #[test]
    fn validation_errors_name_the_field() {
        let p = domain_error_to_problem(&DomainError::EmptyName, "/User", None);
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.code, "USER_VALIDATION");
        let errors = p.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "Name");

        let e = DomainError::invalid_email("testemai.com");
        let p = domain_error_to_problem(&e, "/User", None);
        assert_eq!(p.errors.unwrap()[0].field, "Email");
    }

    #[test]
    fn not_found_depends_on_operation() {
        let e = DomainError::user_not_found("x@y.io");
        assert_eq!(
            domain_error_to_problem(&e, "/User", None).status,
            StatusCode::NOT_FOUND
        );
        let p = update_error_to_problem(&e, "/User", None);
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.code, "USER_BAD_REQUEST");
    }

    #[test]
    fn database_errors_hide_details() {
        let e = DomainError::database("disk I/O error at /var/db");
        let p = domain_error_to_problem(&e, "/User", None);
        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("/var/db"));
    }

    #[test]
    fn catalog_title_and_status_agree_for_body_errors() {
        for (code, status, title) in [
            (ErrorCode::PayloadTooLarge, 413, "Payload Too Large"),
            (ErrorCode::UnsupportedMediaType, 415, "Unsupported Media Type"),
            (ErrorCode::UnprocessableBody, 422, "Unprocessable Entity"),
            (ErrorCode::Internal, 500, "Internal Server Error"),
        ] {
            let p = code.with_context("x", "/User", None);
            assert_eq!(p.status.as_u16(), status);
            assert_eq!(p.title, title);
            assert_eq!(p.code, code.as_str());
        }
    }

    #[test]
    fn trace_id_prefers_request_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "req-1".parse().unwrap());
        assert_eq!(extract_trace_id(&headers).as_deref(), Some("req-1"));

        headers.insert("x-trace-id", "trace-9".parse().unwrap());
        assert_eq!(extract_trace_id(&headers).as_deref(), Some("trace-9"));
    }
}
