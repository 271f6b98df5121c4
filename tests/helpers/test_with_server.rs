#[macro_export]
macro_rules! test_with_server {
    ($name:ident, |$server:ident, $ctx_state:ident, $config:ident| $body:block) => {
        #[tokio::test(flavor = "multi_thread")]
        async fn $name() {
            use std::sync::Arc;

            use async_trait::async_trait;
            use axum_test::{TestServer, TestServerConfig};
            use photoshare_server::config::AppConfig;
            use photoshare_server::database::client::{Database, DbConfig};
            use photoshare_server::interfaces::tag_suggester::{
                PhotoAnalysis, TagSuggesterInterface,
            };
            use photoshare_server::middleware::mw_ctx::CtxState;
            use photoshare_server::utils::{file::local_file_storage::LocalFileStorage, jwt::JWT};

            struct MockTagSuggester;

            #[async_trait]
            impl TagSuggesterInterface for MockTagSuggester {
                async fn analyze(
                    &self,
                    image: &[u8],
                    _content_type: Option<&str>,
                ) -> Result<PhotoAnalysis, String> {
                    if image == $crate::helpers::BROKEN_IMAGE {
                        return Err("unreadable image".to_string());
                    }
                    Ok(PhotoAnalysis {
                        tags: vec![
                            " sunset ".to_string(),
                            "beach".to_string(),
                            "sunset".to_string(),
                            "".to_string(),
                            "sea".to_string(),
                        ],
                        captions: vec!["Golden hour at the beach".to_string()],
                    })
                }
            }

            let uploads = tempfile::tempdir().expect("uploads tempdir");

            let $config = AppConfig {
                db_namespace: "test".to_string(),
                db_database: "test".to_string(),
                db_password: None,
                db_username: None,
                db_url: "mem://".to_string(),
                jwt_secret: "secret".to_string(),
                jwt_expire_minutes: 30,
                upload_dir: uploads.path().to_string_lossy().to_string(),
                upload_file_size_max_mb: 15,
                frontend_url: None,
                google_api_key: None,
                gemini_model: "gemini-1.5-pro".to_string(),
                admin_email: Some($crate::helpers::ADMIN_EMAIL.to_string()),
                admin_password: Some($crate::helpers::ADMIN_PASSWORD.to_string()),
                server_port: 8000,
            };

            let $ctx_state = {
                let db = Database::connect(DbConfig {
                    url: &$config.db_url,
                    database: &$config.db_database,
                    namespace: &$config.db_namespace,
                    password: $config.db_password.as_deref(),
                    username: $config.db_username.as_deref(),
                })
                .await
                .expect("db connects");
                photoshare_server::init::run_migrations(&db)
                    .await
                    .expect("migrations run");

                Arc::new(CtxState {
                    db,
                    jwt: JWT::new(
                        $config.jwt_secret.clone(),
                        chrono::Duration::minutes($config.jwt_expire_minutes),
                    ),
                    upload_dir: $config.upload_dir.clone(),
                    upload_max_size_mb: $config.upload_file_size_max_mb,
                    frontend_url: $config.frontend_url.clone(),
                    file_storage: Arc::new(LocalFileStorage::new($config.upload_dir.clone())),
                    tag_suggester: Arc::new(MockTagSuggester),
                })
            };
            photoshare_server::init::create_default_admin(&$ctx_state, &$config).await;

            let routes_all = photoshare_server::init::main_router(&$ctx_state);

            let $server = TestServer::new_with_config(
                routes_all,
                TestServerConfig {
                    transport: None,
                    save_cookies: false,
                    expect_success_by_default: false,
                    restrict_requests_with_http_schema: false,
                    default_content_type: None,
                    default_scheme: None,
                },
            )
            .expect("Failed to create test server");

            let _ = (&$ctx_state, &$config);
            $body

            drop(uploads);
        }
    };
}
