//! For reading application configuration.

use serde::Deserialize;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    /// Beers are kept in memory when this is missing.
    pub database: Option<DatabaseConfig>,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
}

impl ServerConfig {
    /// The address to bind the http listener to.
    pub fn http_bind_address(&self) -> String {
        format!("{}:{}", self.http_address, self.http_port)
    }
}

/// Database configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    /// The database username.
    pub username: String,
    /// The database password.
    pub password: String,
    /// The database port.
    pub port: u16,
    /// The database name.
    pub database_name: String,
    /// The database host.
    pub host: String,
}

/// Retrieve [`Config`] from the default configuration file.
#[tracing::instrument]
pub fn load_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("config"))
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn database_section_is_optional() {
        let config = parse(
            r#"
            [server]
            http_address = "127.0.0.1"
            http_port = 8080
            "#,
        );
        assert!(config.database.is_none());
        assert_eq!("127.0.0.1:8080", config.server.http_bind_address());
    }

    #[test]
    fn database_section_is_read() {
        let config = parse(
            r#"
            [server]
            http_address = "0.0.0.0"
            http_port = 9000

            [database]
            username = "postgres"
            password = "postgres"
            host = "localhost"
            port = 5432
            database_name = "beerstock"
            "#,
        );
        let database = config.database.unwrap();
        assert_eq!("beerstock", database.database_name);
        assert_eq!(5432, database.port);
    }
}
