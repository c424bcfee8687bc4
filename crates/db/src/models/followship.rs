use chrono::{DateTime, Utc};
use diesel::{delete, insert_into, prelude::*};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{models::User, schema::followships, types::DbId};

/// Directed follow edge. The acting user is always the follower side.
#[derive(Queryable, Insertable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = followships)]
pub struct Followship {
    pub follower_id: DbId,
    pub following_id: DbId,
    pub published: DateTime<Utc>,
}

impl Followship {
    pub async fn create(
        follower: &User,
        following: &User,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let rows_affected = insert_into(followships::table)
            .values(Followship {
                follower_id: follower.id.clone(),
                following_id: following.id.clone(),
                published: Utc::now(),
            })
            .on_conflict((followships::follower_id, followships::following_id))
            .do_nothing()
            .execute(&mut db_pool.get().await?)
            .await
            .optional()?;

        Ok(rows_affected == Some(1))
    }

    pub async fn delete(
        follower: &User,
        following_id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let rows_affected = delete(
            followships::table
                .filter(followships::follower_id.eq(&follower.id))
                .filter(followships::following_id.eq(following_id)),
        )
        .execute(&mut db_pool.get().await?)
        .await
        .optional()?;

        Ok(rows_affected == Some(1))
    }

    pub async fn all(db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<Vec<Self>> {
        Ok(followships::table
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }
}
