//! Runtime settings: defaults, an optional `doodled.toml`, then `DOODLED_*`
//! environment overrides, highest-priority last

use crate::config::DEFAULT_MODEL_PATH;
use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub host: String,
    pub port: u16,

    /// Path to the ONNX model artifact loaded at startup
    pub model_path: String,

    /// Origins the CORS layer admits (the dev frontend by default)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000i64)?
            .set_default("model_path", DEFAULT_MODEL_PATH)?
            .set_default(
                "allowed_origins",
                vec!["http://localhost:3000", "http://127.0.0.1:3000"],
            )?
            .add_source(File::with_name("doodled").required(false))
            .add_source(Environment::with_prefix("DOODLED"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.model_path, DEFAULT_MODEL_PATH);
        assert_eq!(settings.allowed_origins.len(), 2);
    }
}
