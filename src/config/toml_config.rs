use crate::utils::error::{Result, SgsiError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `sgsi.toml`. Every table may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub document_store: DocumentStoreConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub responses: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    pub uri: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
    pub data_source: Option<String>,
    pub api_key: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SgsiError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SgsiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.to_string()
    }
}

/// Treats blank values and unresolved `${VAR}` placeholders as unset.
pub fn resolved(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !v.contains("${"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[profile]
name = "Ana"
company = "Acme"

[output]
path = "./informes"

[document_store]
uri = "https://data.example.com/app/v1"
database = "sgsi_test"
collection = "respuestas"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.profile.name.as_deref(), Some("Ana"));
        assert_eq!(config.output.path.as_deref(), Some("./informes"));
        assert_eq!(config.document_store.database.as_deref(), Some("sgsi_test"));
        assert!(config.document_store.api_key.is_none());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.profile.name.is_none());
        assert!(config.document_store.uri.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SGSI_TEST_DOCSTORE_URI", "https://docs.example.com");

        let toml_content = r#"
[document_store]
uri = "${SGSI_TEST_DOCSTORE_URI}"
api_key = "${SGSI_TEST_UNSET_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.document_store.uri.as_deref(),
            Some("https://docs.example.com")
        );
        assert_eq!(resolved(config.document_store.api_key), None);

        std::env::remove_var("SGSI_TEST_DOCSTORE_URI");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[profile\nname = 1").unwrap_err();
        assert!(matches!(err, SgsiError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[profile]\nname = \"Luis\"\ncompany = \"Globex\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.profile.company.as_deref(), Some("Globex"));
    }
}
