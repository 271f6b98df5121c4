mod helpers;

use axum::http::StatusCode;
use photoshare_server::models::view::analytics::AnalyticsView;

use crate::helpers::{bearer, create_login_test_user, upload_photo};

test_with_server!(analytics_of_new_user, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, false).await;

    for path in ["/analytics", "/analytics/"] {
        let response = server
            .get(path)
            .add_header("Authorization", bearer(&token))
            .await;
        response.assert_status_ok();
        let analytics = response.json::<AnalyticsView>();
        assert_eq!(analytics.total_photos, 0);
        assert_eq!(analytics.total_followers, 0);
        assert_eq!(analytics.total_following, 0);
        assert_eq!(analytics.total_downloads, 0);
    }
});

test_with_server!(analytics_counts_activity, |server, ctx_state, config| {
    let (photographer, token) = create_login_test_user(&server, true).await;
    let (other, other_token) = create_login_test_user(&server, true).await;
    let (_, fan_token) = create_login_test_user(&server, false).await;

    let first = upload_photo(&server, &token, None, &[]).await;
    let second = upload_photo(&server, &token, None, &[]).await;
    upload_photo(&server, &other_token, None, &[]).await;

    for photo_id in [&first.id, &first.id, &second.id] {
        server
            .get(&format!("/photos/{photo_id}/download"))
            .add_header("Authorization", bearer(&fan_token))
            .await
            .assert_status_ok();
    }

    for follower in [&fan_token, &other_token] {
        server
            .post(&format!("/follow/{}", photographer.id))
            .add_header("Authorization", bearer(follower))
            .await
            .assert_status_ok();
    }
    server
        .post(&format!("/follow/{}", other.id))
        .add_header("Authorization", bearer(&token))
        .await
        .assert_status_ok();

    let response = server
        .get("/analytics")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status_ok();
    let analytics = response.json::<AnalyticsView>();
    assert_eq!(analytics.total_photos, 2);
    assert_eq!(analytics.total_downloads, 3);
    assert_eq!(analytics.total_followers, 2);
    assert_eq!(analytics.total_following, 1);
});

test_with_server!(analytics_requires_login, |server, ctx_state, config| {
    server
        .get("/analytics")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
});
