use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Translation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateConfig {
    /// KEGG organism abbreviation used when a pathway resolves to no known
    /// species.
    #[serde(default = "default_organism")]
    pub default_organism: String,
    /// Optional JSON species table replacing the built-in default table.
    #[serde(default)]
    pub species_file: Option<PathBuf>,
    /// Optional JSON gene-symbol → Entrez id table.
    #[serde(default)]
    pub symbol_map: Option<PathBuf>,
    /// Optional JSON Entrez id → KEGG code table.
    #[serde(default)]
    pub gene_map: Option<PathBuf>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            default_organism: default_organism(),
            species_file: None,
            symbol_map: None,
            gene_map: None,
        }
    }
}

/// Output formatting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_organism() -> String {
    "hsa".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load configuration.
    ///
    /// Looks for the config file in this order:
    /// 1. Path specified in the PAX2KGML_CONFIG environment variable
    /// 2. ./pax2kgml.toml in the current directory
    ///
    /// A missing file at the default location just yields the defaults; a
    /// missing file named via the environment variable is an error.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var("PAX2KGML_CONFIG").map(PathBuf::from).ok();
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from("pax2kgml.toml"));

        let config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else if explicit.is_some() {
            anyhow::bail!("Config file does not exist: {}", path.display());
        } else {
            Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.translate.default_organism.trim().is_empty() {
            anyhow::bail!("translate.default_organism must not be empty");
        }

        for (label, path) in [
            ("translate.species_file", &self.translate.species_file),
            ("translate.symbol_map", &self.translate.symbol_map),
            ("translate.gene_map", &self.translate.gene_map),
        ] {
            if let Some(path) = path {
                if !path.exists() {
                    anyhow::bail!("{} path does not exist: {}", label, path.display());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate the process-wide environment.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_config_env(path: Option<&std::path::Path>, f: impl FnOnce()) {
        let original = std::env::var("PAX2KGML_CONFIG").ok();
        match path {
            Some(p) => std::env::set_var("PAX2KGML_CONFIG", p),
            None => std::env::remove_var("PAX2KGML_CONFIG"),
        }
        f();
        match original {
            Some(v) => std::env::set_var("PAX2KGML_CONFIG", v),
            None => std::env::remove_var("PAX2KGML_CONFIG"),
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pax2kgml.toml");
        fs::write(
            &config_path,
            r#"
[translate]
default_organism = "mmu"

[output]
pretty = false
"#,
        )
        .unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.translate.default_organism, "mmu");
            assert!(!config.output.pretty);
        });
    }

    #[test]
    fn test_config_defaults_apply() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pax2kgml.toml");
        fs::write(&config_path, "").unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load().unwrap();
            assert_eq!(config.translate.default_organism, "hsa");
            assert!(config.output.pretty);
            assert!(config.translate.species_file.is_none());
        });
    }

    #[test]
    fn test_config_explicit_path_must_exist() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        with_config_env(Some(&missing), || {
            let config = Config::load();
            assert!(config.is_err());
        });
    }

    #[test]
    fn test_config_rejects_empty_organism() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pax2kgml.toml");
        fs::write(&config_path, "[translate]\ndefault_organism = \" \"\n").unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load();
            assert!(config.is_err());
            assert!(config
                .unwrap_err()
                .to_string()
                .contains("default_organism"));
        });
    }

    #[test]
    fn test_config_rejects_missing_mapping_file() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pax2kgml.toml");
        fs::write(
            &config_path,
            "[translate]\nsymbol_map = \"/does/not/exist.json\"\n",
        )
        .unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("symbol_map"));
        });
    }
}
