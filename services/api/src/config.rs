/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens. Missing secret aborts startup.
    pub jwt_secret: String,
    /// TCP port to listen on (default 5000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Email of the seeded platform administrator. Env var: `ADMIN_EMAIL`.
    pub admin_email: String,
    /// Initial password of the seeded administrator. Env var: `ADMIN_PASSWORD`.
    pub admin_password: String,
    /// Source URL for the one-time transactions import; import is skipped
    /// when unset. Env var: `TRANSACTIONS_SEED_URL`.
    pub transactions_seed_url: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@platform.com".to_owned()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "Admin@123".to_owned()),
            transactions_seed_url: std::env::var("TRANSACTIONS_SEED_URL").ok(),
        }
    }
}
