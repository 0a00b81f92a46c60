mod common;

use std::collections::HashSet;

use users_admin::contract::model::{UserPatch, UsersQuery};
use users_admin::domain::error::DomainError;

use common::{new_user, seed_numbered, service_with};

#[tokio::test]
async fn first_page_uses_configured_page_size() {
    let svc = service_with(10).await;
    seed_numbered(&svc, 25).await;

    let page = svc.list_users(UsersQuery::new(1, "")).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 3);

    let last = svc.list_users(UsersQuery::new(3, "")).await.unwrap();
    assert_eq!(last.items.len(), 5);
}

#[tokio::test]
async fn pages_are_disjoint_and_cover_everyone() {
    let svc = service_with(4).await;
    let seeded = seed_numbered(&svc, 10).await;

    let mut seen = HashSet::new();
    for p in 1..=3 {
        let page = svc.list_users(UsersQuery::new(p, "")).await.unwrap();
        assert_eq!(page.total_pages, 3);
        for u in page.items {
            assert!(seen.insert(u.id), "user {} listed twice", u.username);
        }
    }
    let expected: HashSet<_> = seeded.iter().map(|u| u.id).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn page_beyond_last_is_empty_with_same_total() {
    let svc = service_with(10).await;
    seed_numbered(&svc, 3).await;

    let page = svc.list_users(UsersQuery::new(7, "")).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.page, 7);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn huge_page_numbers_return_empty_data_with_real_total() {
    let svc = service_with(10).await;
    seed_numbered(&svc, 12).await;

    for page_no in [i64::MAX as u64 / 10 + 5, u64::MAX] {
        let page = svc.list_users(UsersQuery::new(page_no, "")).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.page, page_no);
        assert_eq!(page.total_pages, 2);
    }

    let searched = svc
        .list_users(UsersQuery::new(u64::MAX, "user0"))
        .await
        .unwrap();
    assert!(searched.items.is_empty());
    assert_eq!(searched.total_pages, 1);
}

#[tokio::test]
async fn page_zero_is_a_validation_error() {
    let svc = service_with(10).await;
    let err = svc.list_users(UsersQuery::new(0, "")).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidPage { page: 0 }));
    assert!(err.is_validation());
}

#[tokio::test]
async fn search_is_case_insensitive_over_username_email_and_name() {
    let svc = service_with(10).await;
    svc.create_user(new_user("alice", "Alice Liddell")).await.unwrap();
    svc.create_user(new_user("bob", "Robert Paulson")).await.unwrap();
    let mut carol = new_user("carol", "Carol Danvers");
    carol.email = "captain@marvel.io".into();
    svc.create_user(carol).await.unwrap();

    let by_name = svc.list_users(UsersQuery::new(1, "PAULSON")).await.unwrap();
    assert_eq!(by_name.items.len(), 1);
    assert_eq!(by_name.items[0].username, "bob");

    let by_email = svc.list_users(UsersQuery::new(1, "Marvel")).await.unwrap();
    assert_eq!(by_email.items[0].username, "carol");

    let by_username = svc.list_users(UsersQuery::new(1, "  ALI ")).await.unwrap();
    assert_eq!(by_username.items.len(), 1);
    assert_eq!(by_username.items[0].username, "alice");
}

#[tokio::test]
async fn search_folds_non_ascii_letters() {
    let svc = service_with(10).await;
    svc.create_user(new_user("emile", "Émile Zola")).await.unwrap();
    svc.create_user(new_user("bjork", "Björk Guðmundsdóttir")).await.unwrap();

    for term in ["émile", "Émile", "ÉMILE ZOLA"] {
        let page = svc.list_users(UsersQuery::new(1, term)).await.unwrap();
        assert_eq!(page.items.len(), 1, "term {term:?}");
        assert_eq!(page.items[0].username, "emile");
    }

    let page = svc.list_users(UsersQuery::new(1, "GUÐMUNDS")).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].username, "bjork");
}

#[tokio::test]
async fn renamed_user_is_found_by_new_name_only() {
    let svc = service_with(10).await;
    let u = svc.create_user(new_user("zoe", "Zoé Old")).await.unwrap();
    svc.update_user(
        u.id,
        UserPatch {
            name: Some("Zoé Ångström".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let hits = svc.list_users(UsersQuery::new(1, "ångström")).await.unwrap();
    assert_eq!(hits.items.len(), 1);
    let stale = svc.list_users(UsersQuery::new(1, "old")).await.unwrap();
    assert!(stale.items.is_empty());
}

#[tokio::test]
async fn search_with_no_match_yields_empty_data_and_one_page() {
    let svc = service_with(10).await;
    seed_numbered(&svc, 5).await;

    let page = svc
        .list_users(UsersQuery::new(1, "zzz_no_such_user"))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn like_wildcards_in_search_are_literal() {
    let svc = service_with(10).await;
    svc.create_user(new_user("plain", "Plain Name")).await.unwrap();
    svc.create_user(new_user("under_score", "Under Score")).await.unwrap();

    let pct = svc.list_users(UsersQuery::new(1, "%")).await.unwrap();
    assert!(pct.items.is_empty());

    let underscore = svc.list_users(UsersQuery::new(1, "_")).await.unwrap();
    assert_eq!(underscore.items.len(), 1);
    assert_eq!(underscore.items[0].username, "under_score");
}

#[tokio::test]
async fn overlong_search_is_rejected() {
    let svc = service_with(10).await;
    let err = svc
        .list_users(UsersQuery::new(1, "x".repeat(101)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SearchTooLong { len: 101, max: 100 }));
}

#[tokio::test]
async fn blocking_is_visible_to_subsequent_queries() {
    let svc = service_with(10).await;
    let ann = svc.create_user(new_user("ann", "Ann Lee")).await.unwrap();
    assert!(ann.active);

    let change = svc.set_user_active(ann.id, false).await.unwrap();
    assert!(change.success);
    assert!(change.changed);
    assert_eq!(change.message, "User ann has been blocked");

    let page = svc.list_users(UsersQuery::new(1, "ann")).await.unwrap();
    assert!(!page.items[0].active);
}

#[tokio::test]
async fn repeated_status_change_is_an_idempotent_success() {
    let svc = service_with(10).await;
    let ann = svc.create_user(new_user("ann", "Ann Lee")).await.unwrap();

    let first = svc.set_user_active(ann.id, false).await.unwrap();
    let second = svc.set_user_active(ann.id, false).await.unwrap();

    assert!(second.success);
    assert!(!second.changed);
    assert_eq!(second.message, "User ann is already blocked");
    assert_eq!(second.user.updated_at, first.user.updated_at);
    assert!(!second.user.active);

    let back = svc.set_user_active(ann.id, true).await.unwrap();
    assert_eq!(back.message, "User ann has been unblocked");
    let again = svc.set_user_active(ann.id, true).await.unwrap();
    assert_eq!(again.message, "User ann is already active");
}

#[tokio::test]
async fn unknown_user_status_change_is_not_found() {
    let svc = service_with(10).await;
    let id = uuid::Uuid::new_v4();
    let err = svc.set_user_active(id, false).await.unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { id: got } if got == id));
}

#[tokio::test]
async fn edit_updates_profile_but_never_active() {
    let svc = service_with(10).await;
    let ann = svc.create_user(new_user("ann", "Ann Lee")).await.unwrap();
    svc.set_user_active(ann.id, false).await.unwrap();

    let updated = svc
        .update_user(
            ann.id,
            UserPatch {
                name: Some("Ann Marie Lee".into()),
                profile_image: Some("https://img.example.com/ann.png".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ann Marie Lee");
    let stored = svc.get_user(ann.id).await.unwrap();
    assert_eq!(stored.name, "Ann Marie Lee");
    assert_eq!(
        stored.profile_image.as_deref(),
        Some("https://img.example.com/ann.png")
    );
    assert!(!stored.active, "edit must not unblock");
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() {
    let svc = service_with(10).await;
    let ann = svc.create_user(new_user("ann", "Ann Lee")).await.unwrap();
    let bob = svc.create_user(new_user("bob", "Bob Ross")).await.unwrap();

    let err = svc.create_user(new_user("ann", "Other Ann")).await.unwrap_err();
    assert!(matches!(err, DomainError::UsernameTaken { .. }));

    let err = svc
        .update_user(
            bob.id,
            UserPatch {
                email: Some(ann.email.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmailTaken { .. }));

    // keeping your own email is fine
    svc.update_user(
        ann.id,
        UserPatch {
            email: Some(ann.email.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn create_validates_fields() {
    let svc = service_with(10).await;

    let err = svc.create_user(new_user("  ", "Blank")).await.unwrap_err();
    assert!(matches!(err, DomainError::EmptyField { field: "username" }));

    let mut bad_email = new_user("eve", "Eve");
    bad_email.email = "eve-at-nowhere".into();
    let err = svc.create_user(bad_email).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidEmail { .. }));

    let err = svc
        .create_user(new_user("long", &"n".repeat(101)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::FieldTooLong { field: "name", len: 101, max: 100 }
    ));
}
