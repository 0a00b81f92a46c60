use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use modkit::api::problem::{Problem, ProblemResponse};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::rest::dto::{
    CreateUserReq, ListUsersQuery, SetUserStatusReq, StatusChangeDto, UpdateUserReq, UserDto,
    UsersPageDto,
};
use crate::api::rest::error::{bad_input, map_domain_error};
use crate::domain::service::Service;

/// List users, one page at a time
#[utoipa::path(
    get,
    path = "/users",
    operation_id = "users_admin.list_users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = UsersPageDto),
        (status = 400, description = "Invalid page or search", body = Problem, content_type = "application/problem+json"),
        (status = 503, description = "User store unavailable", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<UsersPageDto>, ProblemResponse> {
    let Query(query) = query.map_err(|e| bad_input(e.body_text(), uri.path()))?;
    debug!(?query, "listing users");

    svc.list_users(query.into())
        .await
        .map(|page| Json(page.into()))
        .map_err(|e| map_domain_error(&e, uri.path()))
}

/// Block or unblock a user
#[utoipa::path(
    patch,
    path = "/users/status",
    operation_id = "users_admin.set_user_status",
    tag = "users",
    request_body = SetUserStatusReq,
    responses(
        (status = 200, description = "Status applied (or already in place)", body = StatusChangeDto),
        (status = 400, description = "Malformed body", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Unknown user", body = Problem, content_type = "application/problem+json"),
        (status = 503, description = "User store unavailable", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn set_user_status(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<SetUserStatusReq>, JsonRejection>,
) -> Result<Json<StatusChangeDto>, ProblemResponse> {
    let Json(req) = body.map_err(|e| bad_input(e.body_text(), uri.path()))?;

    match svc.set_user_active(req.user_id, req.active).await {
        Ok(change) => {
            info!(user_id = %req.user_id, active = req.active, changed = change.changed, "status request handled");
            Ok(Json(change.into()))
        }
        Err(e) => {
            warn!(user_id = %req.user_id, error = %e, "status request failed");
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    operation_id = "users_admin.get_user",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Unknown user", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<UserDto>, ProblemResponse> {
    svc.get_user(id)
        .await
        .map(|u| Json(u.into()))
        .map_err(|e| map_domain_error(&e, uri.path()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    operation_id = "users_admin.create_user",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Invalid fields", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Username or email taken", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ProblemResponse> {
    let Json(req) = body.map_err(|e| bad_input(e.body_text(), uri.path()))?;

    svc.create_user(req.into())
        .await
        .map(|u| (StatusCode::CREATED, Json(u.into())))
        .map_err(|e| map_domain_error(&e, uri.path()))
}

/// Update a user's profile fields
#[utoipa::path(
    put,
    path = "/users/{id}",
    operation_id = "users_admin.update_user",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid fields", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Unknown user", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Username or email taken", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
    body: Result<Json<UpdateUserReq>, JsonRejection>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let Json(req) = body.map_err(|e| bad_input(e.body_text(), uri.path()))?;

    svc.update_user(id, req.into())
        .await
        .map(|u| Json(u.into()))
        .map_err(|e| map_domain_error(&e, uri.path()))
}
