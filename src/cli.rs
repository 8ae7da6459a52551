use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use crate::config::{FileConfig, Output, Settings, discover_config};
use crate::generate::render;
use crate::module::{DEFAULT_MODULE_NAME, Target, assemble, write_module};
use crate::options::GenerateOptions;
use crate::schema::Schema;
use crate::sdl::parse_sdl;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Decide from the file extension (`.graphql`, `.graphqls`, `.gql` are SDL).
    #[default]
    Auto,
    Introspection,
    Sdl,
}

impl InputFormat {
    fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let ext = path.extension().and_then(|s| s.to_str());
                if matches!(ext, Some("graphql" | "graphqls" | "gql")) {
                    InputFormat::Sdl
                } else {
                    InputFormat::Introspection
                }
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gql-typegen")]
#[command(
    about = "Generate Flow / TypeScript type declarations from a GraphQL schema",
    version
)]
pub struct Cli {
    /// Introspection query result (JSON) or SDL document.
    pub schema: PathBuf,

    /// Output file; `-` writes to stdout. Defaults to `graphql-export.flow.js`.
    #[arg(short = 'o', long, env = "GQL_TYPEGEN_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Name recorded in the module header. Defaults to `GQL`.
    #[arg(short = 'm', long, env = "GQL_TYPEGEN_MODULE_NAME")]
    pub module_name: Option<String>,

    /// Type names to leave out (comma delimited).
    #[arg(short = 'i', long, value_delimiter = ',')]
    pub ignored_types: Vec<String>,

    /// Export every declaration.
    #[arg(short = 'e', long, default_value_t = false)]
    pub export: bool,

    /// Suffix appended to every generated type name.
    #[arg(short = 'p', long, env = "GQL_TYPEGEN_POST_FIX")]
    pub post_fix: Option<String>,

    #[arg(long, value_enum)]
    pub target: Option<Target>,

    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub input_format: InputFormat,

    /// JSON config file. Defaults to `gql-typegen.json` when present.
    #[arg(long, env = "GQL_TYPEGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file; ignored types from both are combined.
    pub fn settings(&self, file: FileConfig) -> Settings {
        let mut ignored_types: BTreeSet<String> = file.ignored_types.into_iter().collect();
        ignored_types.extend(
            self.ignored_types
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        );

        let target = self.target.or(file.target).unwrap_or_default();
        let output = self
            .output_file
            .clone()
            .or(file.output_file)
            .unwrap_or_else(|| target.default_output_file());

        Settings {
            options: GenerateOptions {
                ignored_types,
                export: self.export || file.export.unwrap_or(false),
                post_fix: self.post_fix.clone().or(file.post_fix).unwrap_or_default(),
            },
            module_name: self
                .module_name
                .clone()
                .or(file.module_name)
                .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string()),
            target,
            output: Output::from_path(output),
        }
    }
}

pub fn load_schema(path: &Path, format: InputFormat) -> anyhow::Result<Schema> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let schema = match format.resolve(path) {
        InputFormat::Sdl => parse_sdl(&src),
        InputFormat::Auto | InputFormat::Introspection => Schema::from_introspection_json(&src),
    }
    .with_context(|| format!("failed to load schema {}", path.display()))?;
    Ok(schema)
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = discover_config(cli.config.as_deref())?;
    let settings = cli.settings(file_config);
    tracing::debug!(?settings, "resolved settings");

    let schema = load_schema(&cli.schema, cli.input_format)?;
    let module = assemble(
        settings.target,
        &settings.module_name,
        &render(&schema, &settings.options),
    );

    match &settings.output {
        Output::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(module.as_bytes())?;
            stdout.flush()?;
        }
        Output::File(path) => {
            write_module(path, &module)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote type declarations");
        }
    }
    Ok(())
}
