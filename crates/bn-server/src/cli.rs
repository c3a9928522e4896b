//! Command-line interface of the `beaunifi` binary.

use anyhow::{bail, Context};
use bn_codec::FormatterSet;
use bn_core::config::MAX_INDENT_SIZE;
use bn_core::{BeaunifiConfig, Language};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "beaunifi", version, about = "Beautify and minify JavaScript and CSS")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging for all crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the MCP server (stdio unless --http)
    Serve {
        #[arg(long)]
        http: bool,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Report whether a file looks minified
    Detect {
        file: PathBuf,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print a beautified copy of a file
    Beautify {
        file: PathBuf,
        #[arg(long)]
        indent: Option<usize>,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print a minified copy of a file
    Minify {
        file: PathBuf,
        #[arg(long)]
        lang: Option<String>,
    },
}

/// Defaults, then the config file, then `BEAUNIFI_*` variables.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<BeaunifiConfig> {
    let mut config = match path {
        Some(p) => BeaunifiConfig::from_file(p)
            .with_context(|| format!("failed to load config from {}", p.display()))?,
        None => BeaunifiConfig::default(),
    };
    config.apply_env().context("invalid environment override")?;
    Ok(config)
}

/// `--lang` wins; otherwise the file extension decides.
pub fn resolve_language(file: &Path, lang: Option<&str>) -> anyhow::Result<Language> {
    if let Some(lang) = lang {
        return Ok(lang.parse()?);
    }
    match Language::from_path(file) {
        Some(language) => Ok(language),
        None => bail!(
            "cannot infer the language of {}; pass --lang js or --lang css",
            file.display()
        ),
    }
}

fn read_source(file: &Path, config: &BeaunifiConfig) -> anyhow::Result<String> {
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    if code.len() > config.format.max_input_bytes {
        bail!(
            "{} is {} bytes, over the {} byte limit",
            file.display(),
            code.len(),
            config.format.max_input_bytes
        );
    }
    Ok(code)
}

pub fn run_detect(file: &Path, lang: Option<&str>, config: &BeaunifiConfig) -> anyhow::Result<String> {
    let language = resolve_language(file, lang)?;
    let code = read_source(file, config)?;
    let detection = bn_smart::detect(&code, language);
    Ok(serde_json::to_string(&detection)?)
}

pub fn run_beautify(
    file: &Path,
    indent: Option<usize>,
    lang: Option<&str>,
    config: &BeaunifiConfig,
) -> anyhow::Result<String> {
    let language = resolve_language(file, lang)?;
    let code = read_source(file, config)?;
    let indent = indent.unwrap_or(config.format.indent_size);
    if indent > MAX_INDENT_SIZE {
        bail!("--indent must be at most {MAX_INDENT_SIZE}, got {indent}");
    }
    let out = FormatterSet::default()
        .beautify(language, &code, indent)
        .with_context(|| format!("failed to beautify {}", file.display()))?;
    Ok(out)
}

pub fn run_minify(file: &Path, lang: Option<&str>, config: &BeaunifiConfig) -> anyhow::Result<String> {
    let language = resolve_language(file, lang)?;
    let code = read_source(file, config)?;
    let out = FormatterSet::default()
        .minify(language, &code)
        .with_context(|| format!("failed to minify {}", file.display()))?;
    Ok(out)
}
