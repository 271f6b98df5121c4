pub mod follow_entity;
pub mod local_user_entity;
