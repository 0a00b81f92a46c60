use sea_orm::Set;

use crate::contract::model::User;
use crate::infra::storage::entity::{ActiveModel, Model};

impl From<Model> for User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            name: m.name,
            email: m.email,
            profile_image: m.profile_image,
            active: m.active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Search folding shared by stored columns and query terms.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Full row, used for inserts.
pub fn to_active_model(u: User) -> ActiveModel {
    ActiveModel {
        id: Set(u.id),
        username_folded: Set(fold(&u.username)),
        email_folded: Set(fold(&u.email)),
        name_folded: Set(fold(&u.name)),
        username: Set(u.username),
        name: Set(u.name),
        email: Set(u.email),
        profile_image: Set(u.profile_image),
        active: Set(u.active),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

/// Profile columns only; `active` and `created_at` stay `NotSet`.
pub fn to_profile_update(u: User) -> ActiveModel {
    ActiveModel {
        id: Set(u.id),
        username_folded: Set(fold(&u.username)),
        email_folded: Set(fold(&u.email)),
        name_folded: Set(fold(&u.name)),
        username: Set(u.username),
        name: Set(u.name),
        email: Set(u.email),
        profile_image: Set(u.profile_image),
        updated_at: Set(u.updated_at),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn folded_columns_follow_profile_fields() {
        let now = Utc::now();
        let am = to_profile_update(User {
            id: Uuid::nil(),
            username: "ÉMILE".into(),
            name: "Émile Zola".into(),
            email: "Emile@Example.com".into(),
            profile_image: None,
            active: true,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(am.username_folded, Set("émile".to_string()));
        assert_eq!(am.name_folded, Set("émile zola".to_string()));
        assert_eq!(am.email_folded, Set("emile@example.com".to_string()));
        assert!(am.active.is_not_set());
    }
}
