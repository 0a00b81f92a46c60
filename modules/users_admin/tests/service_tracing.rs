//! The service layer emits `users_admin.service.*` spans.

mod common;

use tracing_test::traced_test;
use users_admin::contract::model::UsersQuery;

use common::{new_user, service_with};

#[tokio::test]
#[traced_test]
async fn list_users_runs_inside_service_span() {
    let svc = service_with(10).await;
    svc.create_user(new_user("ann", "Ann Lee")).await.unwrap();

    svc.list_users(UsersQuery::new(1, "ann")).await.unwrap();

    assert!(logs_contain("users_admin.service.list_users"));
    assert!(logs_contain("listed users"));
}

#[tokio::test]
#[traced_test]
async fn status_change_records_user_id() {
    let svc = service_with(10).await;
    let ann = svc.create_user(new_user("ann", "Ann Lee")).await.unwrap();

    svc.set_user_active(ann.id, false).await.unwrap();

    assert!(logs_contain("users_admin.service.set_user_active"));
    assert!(logs_contain(&ann.id.to_string()));
    assert!(logs_contain("user status changed"));
}
