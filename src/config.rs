use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Détecte l'environnement depuis APP_ENV
    pub fn detect() -> Self {
        Self::from_app_env(env::var("APP_ENV").ok().as_deref())
    }

    pub fn from_app_env(value: Option<&str>) -> Self {
        match value {
            Some("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// `*` or an empty value allows any origin; otherwise a comma-separated list.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(ToString::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server_host: String,
    pub server_port: u16,
    pub users_file: PathBuf,
    pub audit_file: PathBuf,
    pub static_dir: PathBuf,
    pub cors_origins: CorsOrigins,
}

impl Config {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self> {
        let environment = Environment::detect();

        tracing::info!(
            "🌍 Environment detected: {}",
            environment.as_str().to_uppercase()
        );

        Self::load_env_file(&environment);

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = match env::var("SERVER_PORT").or_else(|_| env::var("PORT")) {
            Ok(port) => port
                .parse()
                .with_context(|| format!("invalid server port: {port}"))?,
            Err(_) => 3000,
        };

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string()));
        let (users_file, audit_file) = Self::table_paths(
            &data_dir,
            env::var("USERS_FILE").ok(),
            env::var("AUDIT_FILE").ok(),
        );
        let static_dir =
            PathBuf::from(env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));
        let cors_origins = CorsOrigins::parse(&env::var("CORS_ORIGINS").unwrap_or_default());

        tracing::info!("✅ Configuration loaded successfully");
        tracing::debug!("   Users table: {}", users_file.display());
        tracing::debug!("   Audit table: {}", audit_file.display());
        tracing::debug!("   Static files: {}", static_dir.display());
        tracing::debug!("   CORS: {cors_origins:?}");
        tracing::debug!("   Server: {server_host}:{server_port}");

        Ok(Self {
            environment,
            server_host,
            server_port,
            users_file,
            audit_file,
            static_dir,
            cors_origins,
        })
    }

    /// Charge le fichier .env en développement
    fn load_env_file(environment: &Environment) {
        if environment.is_production() {
            tracing::info!("📦 Production mode: using injected environment variables");
            return;
        }

        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("   Loaded: {}", path.display()),
            Err(_) => tracing::warn!("   .env file not found, using environment variables"),
        }
    }

    /// Explicit file paths win over the data directory defaults
    fn table_paths(
        data_dir: &Path,
        users_file: Option<String>,
        audit_file: Option<String>,
    ) -> (PathBuf, PathBuf) {
        (
            users_file.map_or_else(|| data_dir.join("users.csv"), PathBuf::from),
            audit_file.map_or_else(|| data_dir.join("audit.csv"), PathBuf::from),
        )
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Configuration rooted in `dir`, for tests.
    #[cfg(test)]
    pub fn for_dir(dir: &Path) -> Self {
        let (users_file, audit_file) = Self::table_paths(dir, None, None);
        Self {
            environment: Environment::Development,
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            users_file,
            audit_file,
            static_dir: dir.join("static"),
            cors_origins: CorsOrigins::Any,
        }
    }
}
