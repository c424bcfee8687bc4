use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use db::{
    models::{Comment, Followship, Restaurant, User},
    types::DbId,
};
use serde::Serialize;

use crate::entities::restaurants::RestaurantCard;

#[derive(Clone, Serialize, Debug)]
pub struct UserCard {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

impl UserCard {
    pub fn build(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            image: user.image,
        }
    }

    pub fn build_from_vec(users: Vec<User>) -> Vec<Self> {
        users.into_iter().map(Self::build).collect()
    }
}

#[derive(Clone, Serialize, Debug)]
pub struct ProfileComment {
    pub id: String,
    pub text: String,
    pub published: DateTime<Utc>,
    pub restaurant: RestaurantCard,
}

#[derive(Clone, Serialize, Debug)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub published: DateTime<Utc>,
    pub comments: Vec<ProfileComment>,
    pub favorited_restaurants: Vec<RestaurantCard>,
    pub followers: Vec<UserCard>,
    pub followings: Vec<UserCard>,
    pub is_followed: bool,
}

impl Profile {
    pub fn build(
        user: User,
        comments: Vec<(Comment, Restaurant)>,
        favorited_restaurants: Vec<Restaurant>,
        followers: Vec<User>,
        followings: Vec<User>,
        viewer_followings: &HashSet<DbId>,
    ) -> Self {
        Self {
            is_followed: viewer_followings.contains(&user.id),
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            image: user.image,
            published: user.published,
            comments: comments
                .into_iter()
                .map(|(comment, restaurant)| ProfileComment {
                    id: comment.id.to_string(),
                    text: comment.text,
                    published: comment.published,
                    restaurant: RestaurantCard::build(restaurant),
                })
                .collect(),
            favorited_restaurants: RestaurantCard::build_from_vec(favorited_restaurants),
            followers: UserCard::build_from_vec(followers),
            followings: UserCard::build_from_vec(followings),
        }
    }
}

#[derive(Clone, Serialize, Debug)]
pub struct TopUser {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub follower_count: usize,
    pub is_followed: bool,
}

/// Builds the leaderboard: every user annotated with their follower count and
/// whether the viewer already follows them, ordered by follower count. The
/// sort is stable, so equal counts keep the load order.
pub fn rank_users(
    users: Vec<User>,
    followships: &[Followship],
    viewer_followings: &HashSet<DbId>,
) -> Vec<TopUser> {
    let mut follower_counts: HashMap<&DbId, usize> = HashMap::new();
    for followship in followships {
        *follower_counts.entry(&followship.following_id).or_default() += 1;
    }

    let mut ranked = users
        .into_iter()
        .map(|user| TopUser {
            follower_count: follower_counts.get(&user.id).copied().unwrap_or(0),
            is_followed: viewer_followings.contains(&user.id),
            id: user.id.to_string(),
            name: user.name,
            image: user.image,
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.follower_count.cmp(&a.follower_count));
    ranked
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use db::{
        models::{Followship, User},
        types::DbId,
    };

    use super::rank_users;

    fn user(name: &str) -> User {
        User {
            id: DbId::from(format!("id-{name}")),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password_encrypted: String::new(),
            image: None,
            admin: false,
            published: Utc::now(),
            updated: None,
        }
    }

    fn follow(follower: &User, following: &User) -> Followship {
        Followship {
            follower_id: follower.id.clone(),
            following_id: following.id.clone(),
            published: Utc::now(),
        }
    }

    #[test]
    fn ranking_is_sorted_by_follower_count() {
        let alice = user("alice");
        let bob = user("bob");
        let carol = user("carol");
        let followships = vec![
            follow(&alice, &bob),
            follow(&carol, &bob),
            follow(&bob, &carol),
        ];

        let ranked = rank_users(
            vec![alice.clone(), bob.clone(), carol.clone()],
            &followships,
            &HashSet::new(),
        );

        let counts = ranked
            .iter()
            .map(|entry| entry.follower_count)
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![2, 1, 0]);
        assert_eq!(ranked[0].name, "bob");
        assert_eq!(ranked[1].name, "carol");
        assert_eq!(ranked[2].name, "alice");
        for pair in ranked.windows(2) {
            assert!(pair[0].follower_count >= pair[1].follower_count);
        }
    }

    #[test]
    fn ranking_keeps_load_order_between_ties() {
        let alice = user("alice");
        let bob = user("bob");
        let carol = user("carol");

        let ranked = rank_users(vec![alice, bob, carol], &[], &HashSet::new());

        let names = ranked.iter().map(|entry| entry.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn is_followed_reflects_viewer_followings() {
        let alice = user("alice");
        let bob = user("bob");
        let viewer_followings = HashSet::from([bob.id.clone()]);

        let ranked = rank_users(vec![alice, bob], &[], &viewer_followings);

        assert!(!ranked[0].is_followed);
        assert!(ranked[1].is_followed);
    }

    #[test]
    fn a_single_follow_ranks_the_followed_user_first() {
        let alice = user("alice");
        let bob = user("bob");
        let followships = vec![follow(&alice, &bob)];

        let ranked = rank_users(vec![alice, bob], &followships, &HashSet::new());

        assert_eq!(ranked[0].name, "bob");
        assert_eq!(ranked[0].follower_count, 1);
        assert_eq!(ranked[1].name, "alice");
        assert_eq!(ranked[1].follower_count, 0);
    }
}
