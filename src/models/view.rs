pub mod analytics;
pub mod comment;
pub mod follow;
pub mod photo;
pub mod rating;
pub mod user;
