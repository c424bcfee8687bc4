use chrono::{DateTime, Utc};
use diesel::{delete, dsl::sql, insert_into, prelude::*, result::Error::NotFound, sql_types::Bool};
use diesel_async::{
    pooled_connection::deadpool::Pool, scoped_futures::ScopedFutureExt, AsyncConnection,
    AsyncPgConnection, RunQueryDsl,
};

use crate::{
    models::{Restaurant, User},
    schema::{favorites, restaurants},
    types::DbId,
};

#[derive(Queryable, Insertable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = favorites)]
pub struct Favorite {
    pub user_id: DbId,
    pub restaurant_id: DbId,
    pub published: DateTime<Utc>,
}

impl Favorite {
    /// Inserts the favorite row and bumps the restaurant's denormalized
    /// counter in one transaction. Returns `false` when the row already
    /// existed; the composite primary key decides that, so concurrent
    /// duplicate requests cannot both win.
    pub async fn create(
        user: &User,
        restaurant: &Restaurant,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let favorite = Favorite {
            user_id: user.id.clone(),
            restaurant_id: restaurant.id.clone(),
            published: Utc::now(),
        };
        let restaurant_id = restaurant.id.clone();

        let mut conn = db_pool.get().await?;
        let created = conn
            .transaction::<bool, diesel::result::Error, _>(|conn| {
                async move {
                    let rows_affected = insert_into(favorites::table)
                        .values(favorite)
                        .on_conflict((favorites::user_id, favorites::restaurant_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    if rows_affected == 1 {
                        diesel::update(
                            restaurants::table.filter(restaurants::id.eq(&restaurant_id)),
                        )
                        .set(restaurants::favorite_counts.eq(restaurants::favorite_counts + 1))
                        .execute(conn)
                        .await?;
                    }

                    Ok(rows_affected == 1)
                }
                .scope_boxed()
            })
            .await?;

        Ok(created)
    }

    /// Deletes the favorite row and decrements the counter in one
    /// transaction. Returns `false` when there was nothing to delete.
    pub async fn delete(
        user: &User,
        restaurant: &Restaurant,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let user_id = user.id.clone();
        let restaurant_id = restaurant.id.clone();

        let mut conn = db_pool.get().await?;
        let deleted = conn
            .transaction::<bool, diesel::result::Error, _>(|conn| {
                async move {
                    let rows_affected = delete(
                        favorites::table
                            .filter(favorites::user_id.eq(&user_id))
                            .filter(favorites::restaurant_id.eq(&restaurant_id)),
                    )
                    .execute(conn)
                    .await?;

                    if rows_affected == 1 {
                        diesel::update(
                            restaurants::table.filter(restaurants::id.eq(&restaurant_id)),
                        )
                        .set(restaurants::favorite_counts.eq(restaurants::favorite_counts - 1))
                        .execute(conn)
                        .await?;
                    }

                    Ok(rows_affected == 1)
                }
                .scope_boxed()
            })
            .await?;

        Ok(deleted)
    }

    pub async fn exists(
        user: &User,
        restaurant: &Restaurant,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let result = favorites::table
            .select(sql::<Bool>("true"))
            .filter(favorites::user_id.eq(&user.id))
            .filter(favorites::restaurant_id.eq(&restaurant.id))
            .first::<bool>(&mut db_pool.get().await?)
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(NotFound) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
