use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let users = Router::new()
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route("/users/status", patch(handlers::set_user_status))
        .route(
            "/users/{id}",
            get(handlers::get_user).put(handlers::update_user),
        )
        .layer(Extension(service));

    router.merge(users)
}
