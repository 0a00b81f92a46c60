use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::set_user_status,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
    ),
    components(schemas(
        dto::UserDto,
        dto::UsersPageDto,
        dto::SetUserStatusReq,
        dto::StatusChangeDto,
        dto::CreateUserReq,
        dto::UpdateUserReq,
        modkit::Problem,
        modkit::ValidationError,
    )),
    tags((name = "users", description = "User listing and moderation"))
)]
pub struct UsersAdminDoc;

pub fn api_doc() -> utoipa::openapi::OpenApi {
    UsersAdminDoc::openapi()
}
