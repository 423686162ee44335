use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    /// Rows per page on every admin list page.
    pub list_page_size: i64,
}

impl AppConfig {
    /// Rows per page the admin pages have always shown.
    pub const DEFAULT_PAGE_SIZE: i64 = 10;

    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            list_page_size: env::var("LIST_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|size| *size > 0)
                .unwrap_or(Self::DEFAULT_PAGE_SIZE),
        })
    }
}
