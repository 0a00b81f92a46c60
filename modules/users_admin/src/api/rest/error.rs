use axum::http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse, ValidationError};

use crate::domain::error::DomainError;

/// Build a ProblemResponse carrying the current span id as `trace_id`.
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.blogdesk.dev/{}", code))
        .with_code(code)
        .with_instance(instance);

    let problem = match tracing::Span::current().id() {
        Some(id) => problem.with_trace_id(id.into_u64().to_string()),
        None => problem,
    };

    ProblemResponse(problem)
}

/// 400 for malformed query strings or bodies rejected by extractors.
pub fn bad_input(detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "USERS_VALIDATION",
        "Validation error",
        detail,
        instance,
    )
}

fn pointer_for(e: &DomainError) -> Option<String> {
    let p = match e {
        DomainError::InvalidPage { .. } => "/page".to_string(),
        DomainError::SearchTooLong { .. } => "/search".to_string(),
        DomainError::InvalidEmail { .. } => "/email".to_string(),
        DomainError::EmptyField { field } | DomainError::FieldTooLong { field, .. } => {
            format!("/{field}")
        }
        _ => return None,
    };
    Some(p)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "USERS_NOT_FOUND",
            "User not found",
            e.to_string(),
            instance,
        ),
        DomainError::UsernameTaken { .. } | DomainError::EmailTaken { .. } => from_parts(
            StatusCode::CONFLICT,
            "USERS_CONFLICT",
            "Conflict",
            e.to_string(),
            instance,
        ),
        DomainError::Database { .. } => {
            // driver text stays in the log
            tracing::error!(error = ?e, "user store failure");
            from_parts(
                StatusCode::SERVICE_UNAVAILABLE,
                "USERS_STORE_UNAVAILABLE",
                "Service unavailable",
                "User store is temporarily unavailable",
                instance,
            )
        }
        _ => {
            let mut resp = bad_input(e.to_string(), instance);
            if let Some(pointer) = pointer_for(e) {
                resp.0 = resp.0.with_errors(vec![ValidationError {
                    detail: e.to_string(),
                    pointer,
                }]);
            }
            resp
        }
    }
}
