use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub mail: MailConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string. Absence is fatal at startup, checked in main.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
}

/// Transactional mail provider settings. The notification side-channel stays
/// off unless both `api_key` and `admin_address` are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from_address: String,
    pub admin_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Canonical site origin used for sitemap URLs.
    pub base_url: String,
    /// External blog-listing collaborator. No feed means no blog entries.
    pub blog_feed_url: Option<String>,
    pub blog_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs =
                v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Mail overrides
        if let Ok(v) = env::var("MAIL_API_URL") {
            self.mail.api_url = v;
        }
        if let Ok(v) = env::var("MAIL_API_KEY") {
            self.mail.api_key = Some(v);
        }
        if let Ok(v) = env::var("MAIL_FROM_ADDRESS") {
            self.mail.from_address = v;
        }
        if let Ok(v) = env::var("MAIL_ADMIN_ADDRESS") {
            self.mail.admin_address = Some(v);
        }

        // Site overrides
        if let Ok(v) = env::var("SITE_BASE_URL") {
            self.site.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("BLOG_FEED_URL") {
            self.site.blog_feed_url = Some(v);
        }
        if let Ok(v) = env::var("BLOG_TIMEOUT_SECS") {
            self.site.blog_timeout_secs = v.parse().unwrap_or(self.site.blog_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                acquire_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7, // 1 week
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            mail: MailConfig {
                api_url: "https://api.resend.com/emails".to_string(),
                api_key: None,
                from_address: "noreply@localhost".to_string(),
                admin_address: None,
            },
            site: SiteConfig {
                base_url: "http://localhost:3000".to_string(),
                blog_feed_url: None,
                blog_timeout_secs: 10,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                acquire_timeout_secs: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            mail: MailConfig {
                api_url: "https://api.resend.com/emails".to_string(),
                api_key: None,
                from_address: "noreply@staging.example.com".to_string(),
                admin_address: None,
            },
            site: SiteConfig {
                base_url: "https://staging.example.com".to_string(),
                blog_feed_url: None,
                blog_timeout_secs: 10,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                acquire_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                cors_origins: vec!["https://www.example.com".to_string()],
            },
            mail: MailConfig {
                api_url: "https://api.resend.com/emails".to_string(),
                api_key: None,
                from_address: "noreply@example.com".to_string(),
                admin_address: None,
            },
            site: SiteConfig {
                base_url: "https://www.example.com".to_string(),
                blog_feed_url: None,
                blog_timeout_secs: 5,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
