//! Application configuration

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use brancalonia_domain::DEFAULT_CHARACTER_NAME;

/// Sheet template file name inside the data directory.
pub const TEMPLATE_FILE: &str = "brancasheet.pdf";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT: &str = "meu_canalha.pdf";

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the reference JSON files
    pub data_dir: PathBuf,
    /// Explicit sheet template; defaults to `<data_dir>/brancasheet.pdf`
    pub template: Option<PathBuf>,
    /// Name written on exported sheets
    pub character_name: String,
    /// Where `export` writes the filled sheet
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            template: None,
            character_name: DEFAULT_CHARACTER_NAME.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            data_dir: var("BRANCALONIA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            template: var("BRANCALONIA_TEMPLATE").map(PathBuf::from),
            character_name: var("BRANCALONIA_CHARACTER_NAME")
                .unwrap_or(defaults.character_name),
            output: var("BRANCALONIA_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, template: Option<PathBuf>) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        if let Some(template) = template {
            self.template = Some(template);
        }
        self
    }

    pub fn template_path(&self) -> PathBuf {
        self.template
            .clone()
            .unwrap_or_else(|| self.data_dir.join(TEMPLATE_FILE))
    }
}

/// Load `.env` from the working directory, then from the workspace root.
///
/// Variables already set are never overwritten.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned()).expect("config")
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.template_path(), PathBuf::from("data/brancasheet.pdf"));
        assert_eq!(config.character_name, "Canalha Mobile");
    }

    #[test]
    fn template_follows_data_dir() {
        let config = config(&[("BRANCALONIA_DATA_DIR", "/srv/branca")]);
        assert_eq!(
            config.template_path(),
            PathBuf::from("/srv/branca/brancasheet.pdf")
        );
    }

    #[test]
    fn explicit_template_wins() {
        let config = config(&[
            ("BRANCALONIA_DATA_DIR", "/srv/branca"),
            ("BRANCALONIA_TEMPLATE", "/tmp/sheet.pdf"),
        ]);
        assert_eq!(config.template_path(), PathBuf::from("/tmp/sheet.pdf"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("BRANCALONIA_CHARACTER_NAME", "  "), ("BRANCALONIA_OUTPUT", "")]);
        assert_eq!(config.character_name, "Canalha Mobile");
        assert_eq!(config.output, PathBuf::from("meu_canalha.pdf"));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = config(&[("BRANCALONIA_DATA_DIR", "/srv/branca")])
            .with_overrides(Some(PathBuf::from("fixtures")), None);
        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(
            config.template_path(),
            PathBuf::from("fixtures/brancasheet.pdf")
        );
    }
}
