pub mod auth_service;
pub mod best_photo_service;
pub mod photo_service;
pub mod suggestion_service;
