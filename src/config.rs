use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // form posts only, in bytes
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Redis,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub max_age_secs: i64,
    pub secure: bool,
    // Raw key material; 16, 24 or 32 bytes. Generated at startup when absent.
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    pub dir: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = Self::builder()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Defaults for everything except the listen port, which must come from
    /// the environment.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.max_body_size", 64_i64 * 1024)?
            .set_default("server.static_dir", "static")?
            .set_default("database.backend", "redis")?
            .set_default("database.url", "redis://127.0.0.1/")?
            .set_default("database.timeout_secs", 10_i64)?
            .set_default("session.cookie_name", "session")?
            .set_default("session.max_age_secs", 3600_i64)?
            .set_default("session.secure", false)?
            .set_default("auth.bcrypt_cost", i64::from(bcrypt::DEFAULT_COST))?
            .set_default("templates.dir", "templates")
    }
}
