use config::{ConfigError, Environment};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub pg: PgConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
    /// Takes precedence over the `pg.*` connection settings when present.
    pub database_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PgConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub poolminsize: u32,
    pub poolmaxsize: u32,
    pub run_migrations: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("pg.host", "localhost")?
            .set_default("pg.port", 5432)?
            .set_default("pg.user", "postgres")?
            .set_default("pg.password", "postgres")?
            .set_default("pg.dbname", "clientes")?
            .set_default("pg.poolminsize", 1)?
            .set_default("pg.poolmaxsize", 5)?
            .set_default("pg.run_migrations", true)?
            .set_default("cors.allowed_origins", vec!["http://localhost:4200"])?
            .set_default("log.level", "info")?
            .add_source(
                environment
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?
            .try_deserialize::<Config>()
    }

    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.pg.user, self.pg.password, self.pg.host, self.pg.port, self.pg.dbname
            ),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
