use std::env;
use std::path::PathBuf;

use anyhow::Context;

use dashboard_persistence::AdminSeed;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON file holding the whole dashboard document.
    pub database_path: PathBuf,
    /// Credentials of the admin account created when no document exists yet.
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: match env::var("PORT") {
                Ok(port) => port.parse().with_context(|| format!("Invalid PORT: {port}"))?,
                Err(_) => defaults.port,
            },
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        })
    }

    pub fn admin_seed(&self) -> AdminSeed {
        AdminSeed {
            email: self.admin_email.clone(),
            password: self.admin_password.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let seed = AdminSeed::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("data/database.json"),
            admin_email: seed.email,
            admin_password: seed.password,
        }
    }
}
