#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub jwt_secret: String,
    pub jwt_expire_minutes: i64,
    pub upload_dir: String,
    pub upload_file_size_max_mb: u64,
    pub frontend_url: Option<String>,
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");
        let jwt_expire_minutes = std::env::var("JWT_EXPIRE_MINUTES").map_or(30, |t| {
            t.parse::<i64>()
                .expect("JWT_EXPIRE_MINUTES must be number")
        });

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or("uploads".to_string());
        let upload_file_size_max_mb: u64 = std::env::var("UPLOAD_MAX_SIZE_MB")
            .unwrap_or("15".to_string())
            .parse()
            .expect("UPLOAD_MAX_SIZE_MB should be number");

        let frontend_url = std::env::var("FRONTEND_URL")
            .ok()
            .filter(|v| !v.is_empty() && v != "*");

        let google_api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|v| !v.is_empty());
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or("gemini-1.5-pro".to_string());

        let admin_email = std::env::var("ADMIN_EMAIL").ok();
        let admin_password = std::env::var("ADMIN_PASSWORD").ok();

        let server_port = std::env::var("SERVER_PORT").map_or(8000, |t| {
            t.parse::<u16>().expect("SERVER_PORT must be number")
        });

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            jwt_secret,
            jwt_expire_minutes,
            upload_dir,
            upload_file_size_max_mb,
            frontend_url,
            google_api_key,
            gemini_model,
            admin_email,
            admin_password,
            server_port,
        }
    }
}
