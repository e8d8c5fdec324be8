use std::env;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: PathBuf,
    /// 32-byte HMAC key for session cookies; randomized when unset.
    pub session_secret: Option<Vec<u8>>,
    pub seed_demo_users: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| AppError::Config("SERVER_PORT must be a valid port number".to_string()))?;

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "database.json".to_string())
            .into();

        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret_hex) => {
                let secret = hex::decode(&secret_hex)
                    .map_err(|_| AppError::Config("SESSION_SECRET must be a valid hex string".to_string()))?;
                if secret.len() != 32 {
                    return Err(AppError::Config(
                        "SESSION_SECRET must be 32 bytes (64 hex characters)".to_string(),
                    ));
                }
                Some(secret)
            }
            Err(_) => None,
        };

        let seed_demo_users = env::var("DEMO_USERS").map(|v| v == "1").unwrap_or(false);

        Ok(Config {
            server_host,
            server_port,
            database_path,
            session_secret,
            seed_demo_users,
        })
    }
}
