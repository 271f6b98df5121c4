mod helpers;

use axum::http::StatusCode;
use fake::{faker, Fake};
use photoshare_server::middleware::error::ErrorResponseBody;
use photoshare_server::models::view::comment::CommentView;
use photoshare_server::models::view::rating::RatingView;
use serde_json::json;

use crate::helpers::{bearer, create_login_test_user, upload_photo};

test_with_server!(comment_on_photo, |server, ctx_state, config| {
    let (_, owner_token) = create_login_test_user(&server, true).await;
    let (user, token) = create_login_test_user(&server, false).await;
    let photo = upload_photo(&server, &owner_token, None, &[]).await;

    let first: String = faker::lorem::en::Sentence(3..6).fake();
    let second: String = faker::lorem::en::Sentence(3..6).fake();
    for content in [&first, &second] {
        let response = server
            .post(&format!("/photos/{}/comments", photo.id))
            .add_header("Authorization", bearer(&token))
            .json(&json!({ "content": content }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let comment = response.json::<CommentView>();
        assert_eq!(&comment.content, content);
        assert_eq!(comment.user_id, user.id);
        assert_eq!(comment.photo_id, photo.id);
    }

    let response = server.get(&format!("/photos/{}/comments", photo.id)).await;
    response.assert_status_ok();
    let contents: Vec<String> = response
        .json::<Vec<CommentView>>()
        .into_iter()
        .map(|c| c.content)
        .collect();
    assert_eq!(contents, vec![second, first]);
});

test_with_server!(comment_validation_and_access, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, true).await;
    let photo = upload_photo(&server, &token, None, &[]).await;
    let path = format!("/photos/{}/comments", photo.id);

    for content in [String::new(), "x".repeat(501)] {
        server
            .post(&path)
            .add_header("Authorization", bearer(&token))
            .json(&json!({ "content": content }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    server
        .post(&path)
        .json(&json!({ "content": "anonymous" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/photos/missing/comments")
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "content": "hello" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<ErrorResponseBody>().detail, "Photo not found");

    server
        .get("/photos/missing/comments")
        .await
        .assert_status(StatusCode::NOT_FOUND);
});

test_with_server!(rate_photo_and_average, |server, ctx_state, config| {
    let (_, owner_token) = create_login_test_user(&server, true).await;
    let (user, token) = create_login_test_user(&server, false).await;
    let photo = upload_photo(&server, &owner_token, None, &[]).await;

    let response = server
        .get(&format!("/photos/{}/ratings/average", photo.id))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<f64>(), 0.0);

    for (score, token) in [(5, &token), (2, &owner_token)] {
        let response = server
            .post(&format!("/photos/{}/ratings", photo.id))
            .add_header("Authorization", bearer(token))
            .json(&json!({ "score": score }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<RatingView>().score, score);
    }

    let response = server.get(&format!("/photos/{}/ratings", photo.id)).await;
    response.assert_status_ok();
    let ratings = response.json::<Vec<RatingView>>();
    assert_eq!(ratings.len(), 2);
    assert!(ratings.iter().any(|r| r.user_id == user.id && r.score == 5));

    let other = upload_photo(&server, &owner_token, None, &[]).await;
    server
        .post(&format!("/photos/{}/ratings", other.id))
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "score": 1 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get(&format!("/photos/{}/ratings/average", photo.id))
        .await;
    assert_eq!(response.json::<f64>(), 3.5);

    server
        .post(&format!("/photos/{}/ratings", photo.id))
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "score": 5 }))
        .await
        .assert_status(StatusCode::CREATED);
    let response = server
        .get(&format!("/photos/{}/ratings/average", photo.id))
        .await;
    assert_eq!(response.json::<f64>(), 4.0);
});

test_with_server!(rating_validation, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, true).await;
    let photo = upload_photo(&server, &token, None, &[]).await;

    for score in [0, 6] {
        server
            .post(&format!("/photos/{}/ratings", photo.id))
            .add_header("Authorization", bearer(&token))
            .json(&json!({ "score": score }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    for path in [
        "/photos/missing/ratings",
        "/photos/missing/ratings/average",
    ] {
        server.get(path).await.assert_status(StatusCode::NOT_FOUND);
    }
});
