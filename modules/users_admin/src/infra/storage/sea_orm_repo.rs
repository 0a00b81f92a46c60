//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::repo::{UserSlice, UsersRepository};
use crate::infra::storage::entity::{Column, Entity as UserEntity};
use crate::infra::storage::mapper::{fold, to_active_model, to_profile_update};

const LIKE_ESCAPE: char = '\\';

/// `%term%` with LIKE wildcards in the term escaped, folded like the stored columns.
fn contains_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in fold(term).chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn search_condition(term: &str) -> Condition {
    let pattern = contains_pattern(term);
    [Column::UsernameFolded, Column::EmailFolded, Column::NameFolded]
        .into_iter()
        .fold(Condition::any(), |cond, col| {
            cond.add(Expr::col(col).like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)))
        })
}

fn filtered(search: Option<&str>) -> Select<UserEntity> {
    match search {
        Some(term) => UserEntity::find().filter(search_condition(term)),
        None => UserEntity::find(),
    }
}

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn column_taken(
        &self,
        col: Column,
        value: &str,
        except: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let mut q = UserEntity::find().filter(col.eq(value));
        if let Some(id) = except {
            q = q.filter(Column::Id.ne(id));
        }
        let count = q.count(&self.conn).await.context("uniqueness check failed")?;
        Ok(count > 0)
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn search(
        &self,
        search: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> anyhow::Result<UserSlice> {
        // Two statements: the count is a best-effort snapshot.
        let total = self.count(search).await?;

        let rows = filtered(search)
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("list users failed")?;

        Ok(UserSlice {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn count(&self, search: Option<&str>) -> anyhow::Result<u64> {
        filtered(search)
            .count(&self.conn)
            .await
            .context("count users failed")
    }

    async fn set_active(&self, id: Uuid, active: bool, at: DateTime<Utc>) -> anyhow::Result<bool> {
        let res = UserEntity::update_many()
            .col_expr(Column::Active, Expr::value(active))
            .col_expr(Column::UpdatedAt, Expr::value(at))
            .filter(Column::Id.eq(id))
            .filter(Column::Active.ne(active))
            .exec(&self.conn)
            .await
            .context("set_active failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn username_taken(&self, username: &str, except: Option<Uuid>) -> anyhow::Result<bool> {
        self.column_taken(Column::Username, username, except).await
    }

    async fn email_taken(&self, email: &str, except: Option<Uuid>) -> anyhow::Result<bool> {
        self.column_taken(Column::Email, email, except).await
    }

    async fn insert(&self, u: User) -> anyhow::Result<()> {
        let _ = to_active_model(u)
            .insert(&self.conn)
            .await
            .context("insert failed")?;
        Ok(())
    }

    async fn update_profile(&self, u: User) -> anyhow::Result<()> {
        let _ = to_profile_update(u)
            .update(&self.conn)
            .await
            .context("update failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("Ann"), "%ann%");
        assert_eq!(contains_pattern("ÉMILE"), "%émile%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
