use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::user_auth::local_user_entity::LocalUser;
use crate::middleware::utils::string_utils::thing_key;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_photographer: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<LocalUser> for UserView {
    fn from(user: LocalUser) -> Self {
        UserView {
            id: thing_key(&user.id),
            username: user.username,
            email: user.email,
            is_photographer: user.is_photographer,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenView {
    pub access_token: String,
    pub token_type: String,
}

impl AccessTokenView {
    pub fn bearer(access_token: String) -> Self {
        AccessTokenView {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailView {
    pub detail: String,
}
