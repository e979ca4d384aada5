use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub storage: Storage,
}

/// Where the data lives. `memory` and `sqlite` run through the relational
/// backend, `file` through the JSON document backend.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Storage {
    Memory,
    File { path: String },
    Sqlite { path: String },
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.storage.kind", "sqlite")?
            .set_default("server.storage.path", "./pintrack.db")?
            .add_source(File::with_name("pintrack").required(false))
            .add_source(Environment::with_prefix("PINTRACK").separator("__"))
            .build()?
            .try_deserialize()
    }
}
