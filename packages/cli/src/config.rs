use exhibit_layout::{IdGenerator, PreviewOptions};
use exhibit_markup::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "exhibit.config.json";

/// Exhibit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Base URL of the asset host serving preview fonts
    pub cdn_base_path: String,

    /// `<title>` of generated preview documents
    pub preview_title: String,

    /// Reject malformed markup instead of recovering like a browser
    pub strict_parse: bool,

    /// Generate sequential ids from this seed instead of random UUIDs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,

    /// Pretty-print written layout JSON
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cdn_base_path: String::new(),
            preview_title: PreviewOptions::default().title,
            strict_parse: false,
            id_seed: None,
            pretty: true,
        }
    }
}

impl Config {
    /// Load config from a directory, falling back to defaults when the file
    /// is absent
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn path(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }

    pub fn id_generator(&self) -> IdGenerator {
        match &self.id_seed {
            Some(seed) => IdGenerator::sequential(seed),
            None => IdGenerator::random(),
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict_parse,
        }
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            cdn_base_path: self.cdn_base_path.clone(),
            title: self.preview_title.clone(),
        }
    }
}
