use chrono::{DateTime, Utc};
use diesel::{prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::{Comment, User},
    paginate,
    pagination::Pagination,
    schema::{comments, restaurants, users},
    types::DbId,
};

#[derive(
    Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: DbId,
    pub name: String,
    pub tel: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub favorite_counts: i32,
    pub published: DateTime<Utc>,
}

impl Restaurant {
    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let restaurant = restaurants::table
            .filter(restaurants::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match restaurant {
            Ok(restaurant) => Ok(Some(restaurant)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn list(
        pagination: Pagination,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        let query = restaurants::table
            .order(restaurants::id.asc())
            .into_boxed();
        let query = paginate!(query, restaurants::id, pagination);

        Ok(query.load::<Self>(&mut db_pool.get().await?).await?)
    }

    pub async fn comments(
        &self,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<(Comment, User)>> {
        Ok(comments::table
            .filter(comments::restaurant_id.eq(&self.id))
            .inner_join(users::dsl::users.on(users::id.eq(comments::user_id)))
            .select((comments::all_columns, users::all_columns))
            .order(comments::published.desc())
            .load::<(Comment, User)>(&mut db_pool.get().await?)
            .await?)
    }
}
