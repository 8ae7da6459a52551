use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::module::Target;
use crate::options::GenerateOptions;

pub const CONFIG_FILE_NAME: &str = "gql-typegen.json";

/// Config file looked up in the working directory when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Contents of `gql-typegen.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub ignored_types: Vec<String>,
    pub export: Option<bool>,
    pub post_fix: Option<String>,
    pub module_name: Option<String>,
    pub output_file: Option<PathBuf>,
    pub target: Option<Target>,
}

pub fn load_config(path: &Path) -> anyhow::Result<FileConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&s)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Loads `path` when given, otherwise the default file if it exists.
pub fn discover_config(path: Option<&Path>) -> anyhow::Result<FileConfig> {
    match path {
        Some(p) => load_config(p),
        None => {
            let p = default_config_path();
            if p.is_file() {
                tracing::debug!(path = %p.display(), "using config file");
                load_config(&p)
            } else {
                Ok(FileConfig::default())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// `-` means stdout.
    pub fn from_path(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Output::Stdout
        } else {
            Output::File(path)
        }
    }
}

/// Everything one run needs, after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: GenerateOptions,
    pub module_name: String,
    pub target: Target,
    pub output: Output,
}
