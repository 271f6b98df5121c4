pub mod photo_helpers;
pub mod test_with_server;
pub mod user_helpers;

#[allow(unused_imports)]
pub use photo_helpers::{upload_photo, upload_photo_response};
#[allow(unused_imports)]
pub use user_helpers::{create_login_test_user, login_admin, register_user};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const USER_PASSWORD: &str = "some3242paSs#$";

/// Image content the mocked tag suggester refuses to analyze.
pub const BROKEN_IMAGE: &[u8] = b"broken-image";

#[allow(dead_code)]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
