//! Command-line front end: load declarations, layer overrides, print tokens.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::Value;

use crate::args::{parse_assignment, ArgSet, EnvOptions, OptionLayers, Overrides};
use crate::config::{default_options_path, load_options_from, ArgsFile};

/// What to print after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintTarget {
    /// Flag tokens for the external process.
    Flags,
    /// Default options computed from the declarations.
    Defaults,
    /// Effective options after all overrides.
    Options,
}

/// Output encoding for flag tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One token per line.
    Lines,
    /// A JSON array of tokens.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "argset",
    version,
    about = "Resolve declared arguments against options and print CLI flag tokens"
)]
pub struct Cli {
    /// Argument declaration file
    #[arg(short, long, value_name = "FILE")]
    pub args: Option<PathBuf>,

    /// TOML file with option overrides (defaults to the user config file when present)
    #[arg(short, long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Read overrides from environment variables with this prefix (e.g. ARGSET_OPT_)
    #[arg(long, value_name = "PREFIX")]
    pub env_prefix: Option<String>,

    /// Override one option (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, Value)>,

    /// What to print
    #[arg(long, value_enum, default_value_t = PrintTarget::Flags)]
    pub print: PrintTarget,

    /// Output format for flag tokens
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let args_path = cli.args.clone().unwrap_or_else(ArgsFile::default_path);
    let file = ArgsFile::load_from(&args_path)
        .with_context(|| format!("Failed to load arguments from {}", args_path.display()))?;
    tracing::debug!(path = %args_path.display(), args = file.args.len(), "Loaded argument file");

    let mut layers = OptionLayers::new().with(Overrides::from_map(file.options));

    let options_path = match &cli.options {
        Some(path) => Some(path.clone()),
        None => Some(default_options_path()).filter(|p| p.exists()),
    };
    if let Some(path) = options_path {
        let options = load_options_from(&path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?;
        tracing::debug!(path = %path.display(), options = options.len(), "Loaded options file");
        layers = layers.with(Overrides::from_map(options));
    }

    if let Some(prefix) = &cli.env_prefix {
        layers = layers.with(EnvOptions::from_env(prefix.clone()));
    }

    let overrides = cli
        .set
        .iter()
        .fold(Overrides::new(), |acc, (key, value)| acc.with(key.clone(), value.clone()));
    if !overrides.is_empty() {
        layers = layers.with(overrides);
    }

    let set: ArgSet = ArgSet::new(&layers, file.args).context("Failed to resolve arguments")?;

    match cli.print {
        PrintTarget::Flags => write_flags(out, &set.arg_flags(), cli.format)?,
        PrintTarget::Defaults => write_json(out, &set.generate_default_options())?,
        PrintTarget::Options => write_json(out, set.options())?,
    }
    Ok(())
}

fn write_flags(out: &mut impl Write, flags: &[String], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Lines => {
            for flag in flags {
                writeln!(out, "{}", flag)?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(flags)?)?,
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
