mod helpers;

use axum::http::StatusCode;
use photoshare_server::middleware::error::ErrorResponseBody;
use photoshare_server::models::view::user::{AccessTokenView, UserView};
use serde_json::json;

use crate::helpers::user_helpers::login;
use crate::helpers::{bearer, create_login_test_user, register_user, USER_PASSWORD};

test_with_server!(register_returns_created_user, |server, ctx_state, config| {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": " ann.lee ",
            "email": "Ann.Lee@Example.com",
            "password": USER_PASSWORD,
            "is_photographer": true,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let user = response.json::<UserView>();
    assert_eq!(user.username, "ann.lee");
    assert_eq!(user.email, "ann.lee@example.com");
    assert!(user.is_photographer);
    assert!(!user.is_admin);
    assert!(!user.id.is_empty());
    assert!(!user.id.contains(':'));
});

test_with_server!(register_defaults_to_regular_user, |server, ctx_state, config| {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "plain_user",
            "email": "plain@example.com",
            "password": USER_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert!(!response.json::<UserView>().is_photographer);
});

test_with_server!(register_rejects_duplicates, |server, ctx_state, config| {
    register_user(&server, "taken_name", false).await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "other_name",
            "email": "TAKEN_NAME@example.com",
            "password": USER_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<ErrorResponseBody>().detail,
        "Email already registered"
    );

    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "taken_name",
            "email": "fresh@example.com",
            "password": USER_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<ErrorResponseBody>().detail,
        "Username already taken"
    );
});

test_with_server!(register_validates_input, |server, ctx_state, config| {
    let cases = [
        json!({"username": "ab", "email": "ab@example.com", "password": USER_PASSWORD}),
        json!({"username": "valid_name", "email": "not-an-email", "password": USER_PASSWORD}),
        json!({"username": "valid_name", "email": "valid@example.com", "password": "12345"}),
        json!({"username": "x".repeat(51), "email": "long@example.com", "password": USER_PASSWORD}),
    ];
    for body in cases {
        let response = server.post("/auth/register").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
});

test_with_server!(register_accepts_any_characters_in_username, |server, ctx_state, config| {
    let long_name = "é".repeat(50);
    for (username, email) in [
        ("John Doe", "john@example.com"),
        ("Zoë", "zoe@example.com"),
        (long_name.as_str(), "accents@example.com"),
    ] {
        let response = server
            .post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": USER_PASSWORD,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<UserView>().username, username);
    }
});

test_with_server!(login_with_json_and_form, |server, ctx_state, config| {
    let user = register_user(&server, "login_user", false).await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": user.email, "password": USER_PASSWORD }))
        .await;
    response.assert_status_ok();
    let set_cookie = response.header("set-cookie");
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("access_token=Bearer "));
    let token = response.json::<AccessTokenView>();
    assert_eq!(token.token_type, "bearer");
    assert!(!token.access_token.is_empty());

    let response = server
        .post("/auth/login")
        .form(&[("email", "LOGIN_USER@example.com"), ("password", USER_PASSWORD)])
        .await;
    response.assert_status_ok();
});

test_with_server!(login_rejects_bad_credentials, |server, ctx_state, config| {
    let user = register_user(&server, "careful_user", false).await;

    for (email, password) in [
        (user.email.as_str(), "wrong-password"),
        ("nobody@example.com", USER_PASSWORD),
    ] {
        let response = server
            .post("/auth/login")
            .json(&json!({ "username": email, "password": password }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.header("www-authenticate"), "Bearer");
        assert_eq!(
            response.json::<ErrorResponseBody>().detail,
            "Incorrect username or password"
        );
    }
});

test_with_server!(token_from_header_or_cookie, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, false).await;

    let response = server.get("/followees").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<ErrorResponseBody>().detail,
        "Could not validate credentials"
    );

    let response = server
        .get("/followees")
        .add_header("Authorization", bearer("not-a-jwt"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/followees")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status_ok();

    let response = server
        .get("/followees")
        .add_header("Cookie", format!("access_token=Bearer {token}"))
        .await;
    response.assert_status_ok();

    let response = server
        .get("/followees")
        .add_header("Cookie", format!("access_token={token}"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
});

test_with_server!(token_of_deleted_user_is_rejected, |server, ctx_state, config| {
    let (user, token) = create_login_test_user(&server, false).await;
    let admin_token = helpers::login_admin(&server).await;

    server
        .delete(&format!("/admin/users/{}", user.id))
        .add_header("Authorization", bearer(&admin_token))
        .await
        .assert_status_ok();

    let response = server
        .get("/followees")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
});

test_with_server!(welcome_and_health_check, |server, ctx_state, config| {
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Welcome to the Photo Management App" }));

    let response = server.get("/hc").await;
    response.assert_status_ok();
    assert_eq!(response.text(), format!("v{}", env!("CARGO_PKG_VERSION")));
});

test_with_server!(login_helper_matches_login_route, |server, ctx_state, config| {
    let user = register_user(&server, "helper_user", true).await;
    let token = login(&server, &user.email, USER_PASSWORD).await;
    let claims = ctx_state.jwt.decode(&token).expect("valid token");
    assert_eq!(claims.sub, user.id);
});
