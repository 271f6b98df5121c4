use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use photoshare_server::models::view::photo::PhotoView;

use super::bearer;

#[allow(dead_code)]
pub async fn upload_photo_response(
    server: &TestServer,
    token: &str,
    caption: Option<&str>,
    tags: &[&str],
) -> TestResponse {
    let part = Part::bytes(b"fake-jpeg-content".to_vec())
        .file_name("holiday photo.jpg")
        .mime_type("image/jpeg");
    let mut data = MultipartForm::new();
    if let Some(caption) = caption {
        data = data.add_text("caption", caption);
    }
    for tag in tags {
        data = data.add_text("selected_tags", *tag);
    }
    let data = data.add_part("file", part);

    server
        .post("/photos/")
        .add_header("Authorization", bearer(token))
        .multipart(data)
        .await
}

#[allow(dead_code)]
pub async fn upload_photo(
    server: &TestServer,
    token: &str,
    caption: Option<&str>,
    tags: &[&str],
) -> PhotoView {
    let response = upload_photo_response(server, token, caption, tags).await;
    response.assert_status(StatusCode::OK);
    response.json::<PhotoView>()
}
