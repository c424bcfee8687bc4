use chrono::{DateTime, Utc};
use diesel::{delete, dsl::sql, insert_into, prelude::*, result::Error::NotFound, sql_types::Bool};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::{Restaurant, User},
    schema::likes,
    types::DbId,
};

#[derive(Queryable, Insertable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = likes)]
pub struct Like {
    pub user_id: DbId,
    pub restaurant_id: DbId,
    pub published: DateTime<Utc>,
}

impl Like {
    pub async fn create(
        user: &User,
        restaurant: &Restaurant,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let rows_affected = insert_into(likes::table)
            .values(Like {
                user_id: user.id.clone(),
                restaurant_id: restaurant.id.clone(),
                published: Utc::now(),
            })
            .on_conflict((likes::user_id, likes::restaurant_id))
            .do_nothing()
            .execute(&mut db_pool.get().await?)
            .await
            .optional()?;

        Ok(rows_affected == Some(1))
    }

    pub async fn delete(
        user: &User,
        restaurant_id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let rows_affected = delete(
            likes::table
                .filter(likes::user_id.eq(&user.id))
                .filter(likes::restaurant_id.eq(restaurant_id)),
        )
        .execute(&mut db_pool.get().await?)
        .await
        .optional()?;

        Ok(rows_affected == Some(1))
    }

    pub async fn exists(
        user: &User,
        restaurant: &Restaurant,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let result = likes::table
            .select(sql::<Bool>("true"))
            .filter(likes::user_id.eq(&user.id))
            .filter(likes::restaurant_id.eq(&restaurant.id))
            .first::<bool>(&mut db_pool.get().await?)
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(NotFound) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
