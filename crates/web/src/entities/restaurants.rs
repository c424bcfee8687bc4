use chrono::{DateTime, Utc};
use db::models::{Comment, Restaurant, User};
use serde::Serialize;

use crate::entities::users::UserCard;

#[derive(Clone, Serialize, Debug)]
pub struct RestaurantCard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub favorite_counts: i32,
}

impl RestaurantCard {
    pub fn build(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id.to_string(),
            name: restaurant.name,
            description: restaurant.description,
            image: restaurant.image,
            favorite_counts: restaurant.favorite_counts,
        }
    }

    pub fn build_from_vec(restaurants: Vec<Restaurant>) -> Vec<Self> {
        restaurants.into_iter().map(Self::build).collect()
    }
}

#[derive(Clone, Serialize, Debug)]
pub struct RestaurantComment {
    pub id: String,
    pub text: String,
    pub published: DateTime<Utc>,
    pub user: UserCard,
}

#[derive(Clone, Serialize, Debug)]
pub struct RestaurantPage {
    pub id: String,
    pub name: String,
    pub tel: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub favorite_counts: i32,
    pub comments: Vec<RestaurantComment>,
    pub is_favorited: bool,
    pub is_liked: bool,
}

impl RestaurantPage {
    pub fn build(
        restaurant: Restaurant,
        comments: Vec<(Comment, User)>,
        is_favorited: bool,
        is_liked: bool,
    ) -> Self {
        Self {
            id: restaurant.id.to_string(),
            name: restaurant.name,
            tel: restaurant.tel,
            address: restaurant.address,
            opening_hours: restaurant.opening_hours,
            description: restaurant.description,
            image: restaurant.image,
            favorite_counts: restaurant.favorite_counts,
            comments: comments
                .into_iter()
                .map(|(comment, user)| RestaurantComment {
                    id: comment.id.to_string(),
                    text: comment.text,
                    published: comment.published,
                    user: UserCard::build(user),
                })
                .collect(),
            is_favorited,
            is_liked,
        }
    }
}
