#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{ExchangeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub storage: StorageConfig,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

/// Remote ad catalog. When present, ads are read from this service instead of
/// the local state file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl ExchangeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExchangeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExchangeError::InvalidConfigValueError {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR_NAME}` placeholders with environment values; unknown
/// variables are left as-is so validation can point at them.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for ExchangeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;

        if let Some(catalog) = &self.catalog {
            validation::validate_url("catalog.endpoint", &catalog.endpoint)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[storage]
data_dir = "./exchange-data"

[catalog]
endpoint = "https://ads.example.com"
timeout_seconds = 10
"#;

        let config = ExchangeConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.data_dir, "./exchange-data");
        let catalog = config.catalog.unwrap();
        assert_eq!(catalog.endpoint, "https://ads.example.com");
        assert_eq!(catalog.timeout_seconds, Some(10));
        assert!(ExchangeConfig::from_toml_str("[storage]\ndata_dir = \"./d\"\n")
            .unwrap()
            .catalog
            .is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_CATALOG_ENDPOINT", "https://catalog.test.com");

        let toml_content = r#"
[storage]
data_dir = "./data"

[catalog]
endpoint = "${TEST_CATALOG_ENDPOINT}"
"#;

        let config = ExchangeConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.catalog.unwrap().endpoint,
            "https://catalog.test.com"
        );

        std::env::remove_var("TEST_CATALOG_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[storage]
data_dir = "./data"

[catalog]
endpoint = "not-a-url"
"#;

        let config = ExchangeConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[storage]
data_dir = "./file-data"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ExchangeConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.data_dir, "./file-data");
        assert!(config.validate().is_ok());
    }
}
