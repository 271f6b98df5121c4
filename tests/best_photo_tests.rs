mod helpers;

use axum::http::StatusCode;
use chrono::Utc;
use photoshare_server::entities::photo::best_photo_entity::BestPhotoDbService;
use photoshare_server::middleware::ctx::Ctx;
use photoshare_server::middleware::error::ErrorResponseBody;
use photoshare_server::models::view::photo::BestPhotoView;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{bearer, create_login_test_user, upload_photo};

test_with_server!(no_photos_today, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, false).await;

    let response = server
        .get("/best-photo-today")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<ErrorResponseBody>().detail,
        "No photos available for today"
    );
});

test_with_server!(best_photo_is_stored_for_the_day, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, true).await;
    let plain = upload_photo(&server, &token, Some("plain"), &[]).await;
    let liked = upload_photo(&server, &token, Some("liked"), &["best"]).await;

    server
        .post(&format!("/photos/{}/ratings", liked.id))
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "score": 4 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/best-photo-today")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status_ok();
    let best = response.json::<BestPhotoView>();
    let today = Utc::now().date_naive().to_string();
    assert_eq!(best.date, today);
    assert_eq!(best.photo.id, liked.id);
    assert_eq!(best.photo.tags, vec!["best"]);

    for _ in 0..25 {
        server
            .post(&format!("/photos/{}/comments", plain.id))
            .add_header("Authorization", bearer(&token))
            .json(&json!({ "content": "great" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/best-photo-today")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.json::<BestPhotoView>().photo.id, liked.id);

    let ctx = Ctx::new(Ok("test".to_string()), Uuid::new_v4());
    let stored = BestPhotoDbService {
        db: &ctx_state.db.client,
        ctx: &ctx,
    }
    .get_by_date(&today)
    .await
    .unwrap()
    .expect("best photo stored");
    assert_eq!(stored.photo.id.to_raw(), liked.id);
});

test_with_server!(tie_goes_to_first_upload, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, true).await;
    let first = upload_photo(&server, &token, Some("first"), &[]).await;
    upload_photo(&server, &token, Some("second"), &[]).await;

    let response = server
        .get("/best-photo-today")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<BestPhotoView>().photo.id, first.id);
});

test_with_server!(deleted_best_photo_is_recomputed, |server, ctx_state, config| {
    let (_, token) = create_login_test_user(&server, true).await;
    let first = upload_photo(&server, &token, Some("first"), &[]).await;
    let second = upload_photo(&server, &token, Some("second"), &[]).await;
    let admin_token = helpers::login_admin(&server).await;

    let response = server
        .get("/best-photo-today")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.json::<BestPhotoView>().photo.id, first.id);

    server
        .delete(&format!("/admin/photos/{}", first.id))
        .add_header("Authorization", bearer(&admin_token))
        .await
        .assert_status_ok();

    let response = server
        .get("/best-photo-today")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<BestPhotoView>().photo.id, second.id);
});
