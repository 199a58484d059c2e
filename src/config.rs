use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub target_product_id: String,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
}

impl Config {
    /// Load configuration from the environment. Returns an error describing
    /// the first missing or invalid variable so startup can fail fast.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port: u16 = env::var("PORT")
            .map_err(|_| "PORT is required".to_string())?
            .parse()
            .map_err(|_| "PORT must be a valid port number".to_string())?;

        let target_product_id = env::var("TARGET_PRODUCT_ID")
            .map_err(|_| "TARGET_PRODUCT_ID is required".to_string())?;
        if target_product_id.trim().is_empty() {
            return Err("TARGET_PRODUCT_ID must not be empty".to_string());
        }

        let mail_from = env::var("MAIL_FROM").map_err(|_| "MAIL_FROM is required".to_string())?;

        Ok(Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "showroom.db".to_string()),
            target_product_id,
            resend_api_key: env::var("RESEND_API_KEY").ok(),
            mail_from,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
