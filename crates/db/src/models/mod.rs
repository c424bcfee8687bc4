pub mod comment;
pub mod favorite;
pub mod followship;
pub mod like;
pub mod restaurant;
pub mod session;
pub mod user;

pub use comment::Comment;
pub use favorite::Favorite;
pub use followship::Followship;
pub use like::Like;
pub use restaurant::Restaurant;
pub use session::Session;
pub use user::User;
pub use user::UserUpdate;
