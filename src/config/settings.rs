use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0";

/// Variável de ambiente com o Personal Access Token
pub const ENV_PAT_KEY: &str = "ASANA_PERSONAL_ACCESS_TOKEN";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub personal_access_token: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            personal_access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

impl Settings {
    /// Carrega settings: defaults → `config/asana.*` → variáveis `ASANA_*`
    ///
    /// Um arquivo `.env` no diretório atual é carregado antes, se existir.
    pub fn new() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_file("config/asana")
    }

    /// Igual a [`Settings::new`], com caminho do arquivo explícito (sem extensão)
    pub fn from_file(path: &str) -> Result<Self> {
        let defaults = Settings::default();

        let builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("connect_timeout_secs", defaults.connect_timeout_secs)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("ASANA"));

        let s = builder.build()?;
        let mut settings: Settings = s.try_deserialize()?;

        // Token em branco equivale a ausente
        settings.personal_access_token = settings
            .personal_access_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(settings)
    }
}
