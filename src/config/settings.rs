use crate::config::toml_config::{resolved, TomlConfig};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::env;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_DATABASE: &str = "sgsi_db";
pub const DEFAULT_COLLECTION: &str = "respuestas";
pub const DEFAULT_DATA_SOURCE: &str = "Cluster0";

pub const ENV_DOCUMENT_STORE_URI: &str = "MONGODB_URI";
pub const ENV_DOCUMENT_STORE_API_KEY: &str = "SGSI_DOCSTORE_API_KEY";
pub const ENV_DOCUMENT_STORE_DATA_SOURCE: &str = "SGSI_DOCSTORE_DATA_SOURCE";

/// Effective settings: defaults, then the TOML file, then the environment, then CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: Option<String>,
    pub company: Option<String>,
    pub output_path: String,
    pub responses: Option<String>,
    pub document_store_uri: Option<String>,
    pub database: String,
    pub collection: String,
    pub data_source: String,
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: None,
            company: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            responses: None,
            document_store_uri: None,
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            api_key: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(config: TomlConfig) -> Self {
        let defaults = Self::default();
        let store = config.document_store;
        Self {
            name: resolved(config.profile.name),
            company: resolved(config.profile.company),
            output_path: resolved(config.output.path).unwrap_or(defaults.output_path),
            responses: resolved(config.output.responses),
            document_store_uri: resolved(store.uri),
            database: resolved(store.database).unwrap_or(defaults.database),
            collection: resolved(store.collection).unwrap_or(defaults.collection),
            data_source: resolved(store.data_source).unwrap_or(defaults.data_source),
            api_key: resolved(store.api_key),
        }
    }

    /// Fills document-store settings the file left unset from the process environment.
    /// A missing connection string is not an error here; the exporter reports it on use.
    pub fn with_env(mut self) -> Self {
        if self.document_store_uri.is_none() {
            self.document_store_uri = resolved(env::var(ENV_DOCUMENT_STORE_URI).ok());
        }
        if self.api_key.is_none() {
            self.api_key = resolved(env::var(ENV_DOCUMENT_STORE_API_KEY).ok());
        }
        if let Some(data_source) = resolved(env::var(ENV_DOCUMENT_STORE_DATA_SOURCE).ok()) {
            self.data_source = data_source;
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn load(cli: &crate::config::cli::CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut config = Self::from_toml(file_config).with_env();

        if let Some(name) = &cli.name {
            config.name = Some(name.clone());
        }
        if let Some(company) = &cli.company {
            config.company = Some(company.clone());
        }
        if let Some(output_path) = &cli.output_path {
            config.output_path = output_path.clone();
        }
        if let Some(responses) = &cli.responses {
            config.responses = Some(responses.clone());
        }

        Ok(config)
    }
}

impl ConfigProvider for AppConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn document_store_uri(&self) -> Option<&str> {
        self.document_store_uri.as_deref()
    }

    fn database(&self) -> &str {
        &self.database
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn data_source(&self) -> &str {
        &self.data_source
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// The document-store URI is not checked here; the exporter reports a bad one on use.
impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output.path", &self.output_path)?;
        if let Some(responses) = &self.responses {
            validate_path("output.responses", responses)?;
        }
        Ok(())
    }
}
