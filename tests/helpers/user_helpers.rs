use axum::http::StatusCode;
use axum_test::TestServer;
use fake::{faker, Fake};
use photoshare_server::models::view::user::{AccessTokenView, UserView};
use serde_json::json;

use super::{ADMIN_EMAIL, ADMIN_PASSWORD, USER_PASSWORD};

#[allow(dead_code)]
pub async fn register_user(server: &TestServer, username: &str, is_photographer: bool) -> UserView {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": USER_PASSWORD,
            "is_photographer": is_photographer,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<UserView>()
}

#[allow(dead_code)]
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "username": email, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<AccessTokenView>().access_token
}

/// Registers a user with a generated name and returns it with its access token.
#[allow(dead_code)]
pub async fn create_login_test_user(server: &TestServer, is_photographer: bool) -> (UserView, String) {
    let suffix: u32 = (100_000..999_999).fake();
    let first: String = faker::name::en::FirstName().fake();
    let username: String = format!("{}_{suffix}", first.to_lowercase())
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    let user = register_user(server, &username, is_photographer).await;
    let token = login(server, &user.email, USER_PASSWORD).await;
    (user, token)
}

#[allow(dead_code)]
pub async fn login_admin(server: &TestServer) -> String {
    login(server, ADMIN_EMAIL, ADMIN_PASSWORD).await
}
