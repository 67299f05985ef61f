use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Maximum upload size in bytes; `None` means unlimited
    pub max_upload_size: Option<u64>,
}

/// Where stored files and static assets live on disk
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Flat directory holding every uploaded file
    pub storage_dir: PathBuf,
    /// Optional directory of static assets served as a fallback
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            storage: StorageConfig::from_env(),
            swagger: SwaggerConfig::from_env(),
        })
    }
}

impl AppConfig {
    const DEFAULT_PORT: u16 = 9352;

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| Self::DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size = parse_upload_limit(env::var("MAX_UPLOAD_SIZE").ok().as_deref())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_upload_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Empty, missing or zero means no limit
fn parse_upload_limit(raw: Option<&str>) -> Result<Option<u64>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => {
            let limit = value
                .parse::<u64>()
                .map_err(|_| "MAX_UPLOAD_SIZE must be a valid number".to_string())?;
            Ok((limit > 0).then_some(limit))
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "uploads".to_string());
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "views".to_string());

        Self {
            storage_dir: PathBuf::from(storage_dir),
            static_dir: PathBuf::from(static_dir),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Self {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "File Store API".to_string());
        let version =
            env::var("SWAGGER_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Upload, list, download, rename and delete stored files".to_string());

        Self {
            title,
            version,
            description,
        }
    }
}
