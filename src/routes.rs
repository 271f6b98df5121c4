pub mod admin;
pub mod analytics;
pub mod auth_routes;
pub mod best_photo;
pub mod comments;
pub mod follows;
pub mod photos;
pub mod ratings;
pub mod search;
pub mod suggestions;
