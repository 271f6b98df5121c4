pub mod best_photo_entity;
pub mod comment_entity;
pub mod photo_entity;
pub mod photo_tag_entity;
pub mod rating_entity;
