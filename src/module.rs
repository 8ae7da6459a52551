use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

pub const DEFAULT_MODULE_NAME: &str = "GQL";

/// Dialect the output file is written for. The declarations themselves are
/// valid in both; only the header and default file name differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Flow,
    Typescript,
}

impl Target {
    pub fn default_output_file(self) -> PathBuf {
        match self {
            Target::Flow => PathBuf::from("graphql-export.flow.js"),
            Target::Typescript => PathBuf::from("graphql-export.ts"),
        }
    }

    fn header(self, module_name: &str) -> String {
        match self {
            Target::Flow => format!("// @flow\n// {module_name}: graphql flow definitions\n"),
            Target::Typescript => format!("// {module_name}: graphql type definitions\n"),
        }
    }
}

/// Header comment, a blank line, the declarations, and a trailing newline.
pub fn assemble(target: Target, module_name: &str, declarations: &str) -> String {
    format!("{}\n{declarations}\n", target.header(module_name))
}

pub fn write_module(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
