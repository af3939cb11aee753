//! Minimal CLI: schema → (types | flatten)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::extract::{Extractor, naming};
use crate::ir::TypeModel;
use crate::schema::SchemaNode;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// derive named record types with typed, annotated fields from JSON Schema documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// extract and print the type model as JSON
    Types(TypesOut),
    /// print every object-bearing pointer path and the record name it derives
    Flatten(FlattenOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct TypesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// fail instead of emitting a partial model when any field can't be resolved
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct FlattenOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(&Path, SchemaNode) -> Result<()>) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            info!(path = %source_path.display(), "schema.loading");
            let schema = SchemaNode::load(&source_path)?;
            apply(&source_path, schema)?;
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Logs go to stderr so JSON on stdout stays clean for piping.
    pub fn init_logging(&self) -> Result<()> {
        tracing::subscriber::set_global_default(log_subscriber(self.verbose))
            .context("failed to install the log subscriber")
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Types(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let mut models = IndexMap::<String, TypeModel>::new();
                target.input_settings.load_process(|path, schema| {
                    let (model, errs) = Extractor::new(&schema).create_records();
                    if let Some(errs) = errs {
                        if target.strict {
                            bail!("{}: {errs}", path.display());
                        }
                        eprintln!("{} {}: {errs}", "warning:".yellow().bold(), path.display());
                    }
                    models.insert(path.display().to_string(), model);
                    Ok(())
                })?;

                let output_src = render_models(&models)?;
                write_output(target.out.as_deref(), &output_src)
            }
            Command::Flatten(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                target.input_settings.load_process(|path, schema| {
                    println!("{}", path.display().to_string().bold());
                    for line in flatten_listing(&schema) {
                        println!("  {line}");
                    }
                    Ok(())
                })
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// The `-v` count alone decides what reaches stderr.
fn log_subscriber(verbose: u8) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = match verbose {
        0 => EnvFilter::new("json_typex=warn"),
        1 => EnvFilter::new("json_typex=info"),
        2 => EnvFilter::new("json_typex=debug"),
        _ => EnvFilter::new("json_typex=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
}

/// A single input prints its model directly; several are keyed by path.
fn render_models(models: &IndexMap<String, TypeModel>) -> Result<String> {
    let src = match models.values().next() {
        Some(model) if models.len() == 1 => serde_json::to_string_pretty(model)?,
        _ => serde_json::to_string_pretty(models)?,
    };
    Ok(src)
}

fn flatten_listing(schema: &SchemaNode) -> Vec<String> {
    let types = schema.extract_types();
    let mut keys: Vec<&String> = types.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| format!("{key}\t{}", naming::type_name(key, types[key], 1)))
        .collect()
}

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => println!("{src}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                warn!(pattern, "glob.no_match");
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
