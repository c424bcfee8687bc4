use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::{Comment, Restaurant},
    schema::{comments, favorites, followships, restaurants, users},
    types::DbId,
};

#[derive(
    Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = users)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_encrypted: String,
    pub image: Option<String>,
    pub admin: bool,
    pub published: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

// When you want to null out a column, you have to send Some(None), since sending None means you
// just don't want to update that column
#[derive(AsChangeset, Clone, Default)]
#[diesel(table_name = users)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub image: Option<Option<String>>,
    pub updated: Option<Option<DateTime<Utc>>>,
}

impl User {
    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = users::table
            .filter(users::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn by_email(
        email: &str,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = users::table
            .filter(users::email.eq(email.to_string()))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Inserts a new account. Returns `None` when the email is already taken;
    /// the unique index makes this race-safe.
    pub async fn create(
        name: String,
        email: String,
        password_encrypted: String,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = User {
            id: DbId::default(),
            name,
            email,
            password_encrypted,
            image: None,
            admin: false,
            published: Utc::now(),
            updated: None,
        };

        Ok(insert_into(users::table)
            .values(user)
            .on_conflict(users::email)
            .do_nothing()
            .get_result::<Self>(&mut db_pool.get().await?)
            .await
            .optional()?)
    }

    pub async fn update(
        &self,
        updated_user: UserUpdate,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<()> {
        diesel::update(&self)
            .set(updated_user)
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn all(db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<Vec<Self>> {
        Ok(users::table
            .order(users::published.asc())
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn followers(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<Vec<Self>> {
        Ok(followships::table
            .filter(followships::following_id.eq(&self.id))
            .inner_join(users::dsl::users.on(users::id.eq(followships::follower_id)))
            .select(users::all_columns)
            .order(followships::published.desc())
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn followings(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<Vec<Self>> {
        Ok(followships::table
            .filter(followships::follower_id.eq(&self.id))
            .inner_join(users::dsl::users.on(users::id.eq(followships::following_id)))
            .select(users::all_columns)
            .order(followships::published.desc())
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    /// Ids of everyone this user follows, loaded fresh so `is_followed` flags
    /// never come from a stale session snapshot.
    pub async fn following_ids(
        &self,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<DbId>> {
        Ok(followships::table
            .filter(followships::follower_id.eq(&self.id))
            .select(followships::following_id)
            .load::<DbId>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn favorited_restaurants(
        &self,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Restaurant>> {
        Ok(favorites::table
            .filter(favorites::user_id.eq(&self.id))
            .inner_join(restaurants::dsl::restaurants.on(restaurants::id.eq(favorites::restaurant_id)))
            .select(restaurants::all_columns)
            .order(favorites::published.desc())
            .load::<Restaurant>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn comments(
        &self,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<(Comment, Restaurant)>> {
        Ok(comments::table
            .filter(comments::user_id.eq(&self.id))
            .inner_join(restaurants::dsl::restaurants.on(restaurants::id.eq(comments::restaurant_id)))
            .select((comments::all_columns, restaurants::all_columns))
            .order(comments::published.desc())
            .load::<(Comment, Restaurant)>(&mut db_pool.get().await?)
            .await?)
    }
}
