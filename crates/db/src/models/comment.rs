use chrono::{DateTime, Utc};
use diesel::{delete, insert_into, prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::{Restaurant, User},
    schema::comments,
    types::DbId,
};

#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: DbId,
    pub text: String,
    pub user_id: DbId,
    pub restaurant_id: DbId,
    pub published: DateTime<Utc>,
}

impl Comment {
    pub async fn create(
        text: String,
        user: &User,
        restaurant: &Restaurant,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Self> {
        let comment = Comment {
            id: DbId::default(),
            text,
            user_id: user.id.clone(),
            restaurant_id: restaurant.id.clone(),
            published: Utc::now(),
        };

        Ok(insert_into(comments::table)
            .values(comment)
            .get_result::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let comment = comments::table
            .filter(comments::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match comment {
            Ok(comment) => Ok(Some(comment)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<()> {
        delete(comments::table.filter(comments::id.eq(&self.id)))
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }
}
