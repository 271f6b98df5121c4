pub mod photo;
pub mod user_auth;
