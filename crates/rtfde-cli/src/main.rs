//! Developer tooling around `rtfde-core`.
//!
//! The `rtfde` binary exposes the encoding, classification, flattening and
//! diff primitives on the command line so rewrites can be inspected without
//! writing a test harness. Diff-style subcommands exit with `1` when the
//! inputs differ, mirroring `diff(1)`; errors exit with `2`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use regex::Regex;
use rtfde_core::{
    encode_control_parameter, encode_escaped_control_chars, flatten, flatten_values,
    is_numeric_codeword, string_diff, tree_diff, tree_value_diff, Channel, DiagnosticConfig,
    Diagnostics, Payload, Token, Tree,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RTFDE_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "rtfde",
    version,
    about = "Inspect, diff, and encode RTF de-encapsulation rewrites.",
    after_help = "Diagnostic channels: validation, transform, htmlrtf_stripping, general.\n\
                  Example: rtfde --log transform=debug tree-diff before.json after.json"
)]
struct Cli {
    /// Channel directives such as `transform=debug,general=info`.
    ///
    /// Falls back to the RTFDE_LOG environment variable.
    #[arg(long = "log", global = true, value_name = "DIRECTIVES")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a control parameter as zero-padded hex (e.g. 10 -> 0x000a).
    EncodeParam {
        /// Decimal value, optionally signed.
        value: String,
    },
    /// Replace backslashes and braces with their \'hh escapes.
    Escape {
        /// File to read; STDIN when omitted.
        input: Option<PathBuf>,
    },
    /// Check whether VALUE is CODEWORD followed by a numeric argument.
    Codeword {
        /// Token text, e.g. `\fs24`.
        value: String,
        /// Control word, e.g. `\fs`.
        codeword: String,
    },
    /// Context-diff two text files.
    Diff {
        original: PathBuf,
        revised: PathBuf,
        /// Regex to split on instead of lines; newlines are removed first.
        #[arg(long = "sep", value_name = "PATTERN")]
        separator: Option<String>,
    },
    /// Context-diff two parse trees stored as JSON.
    TreeDiff {
        original: PathBuf,
        revised: PathBuf,
        /// Compare leaf values only, ignoring tree shape and positions.
        #[arg(long = "values")]
        values: bool,
    },
    /// Print the pre-order flattening of a JSON parse tree, one entry per line.
    Flatten {
        tree: PathBuf,
        /// Print leaf values only.
        #[arg(long = "values")]
        values: bool,
    },
}

fn main() {
    match try_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err:#}");
            std::process::exit(2);
        }
    }
}

fn try_main() -> Result<i32> {
    let cli = Cli::parse();

    let directives = cli.log.clone().or_else(|| std::env::var(LOG_ENV).ok()).unwrap_or_default();
    let config = DiagnosticConfig::from_directives(&directives)
        .with_context(|| format!("invalid log directives {directives:?}"))?;
    init_tracing(&config)?;
    let diagnostics = Diagnostics::new(config);

    match &cli.command {
        Command::EncodeParam { value } => {
            let encoded = encode_control_parameter(value.as_str())
                .context("failed to encode control parameter")?;
            println!("{encoded}");
            Ok(0)
        }
        Command::Escape { input } => {
            let raw = read_input(input.as_deref())?;
            let escaped = encode_escaped_control_chars(&raw);
            diagnostics.log_transformation(Payload::StringDiff {
                original: &raw,
                revised: &escaped,
                separator: None,
            });
            print!("{escaped}");
            io::stdout().flush().ok();
            Ok(0)
        }
        Command::Codeword { value, codeword } => {
            let token = Token::new("CONTROLWORD", value.as_str());
            let matched = is_numeric_codeword(&token, codeword);
            diagnostics.log_validation(Payload::Token(&token));
            println!("{matched}");
            Ok(if matched { 0 } else { 1 })
        }
        Command::Diff { original, revised, separator } => {
            let separator = separator
                .as_deref()
                .map(Regex::new)
                .transpose()
                .context("invalid --sep pattern")?;
            let original = read_input(Some(original.as_path()))?;
            let revised = read_input(Some(revised.as_path()))?;
            emit_diff(&string_diff(&original, &revised, separator.as_ref()))
        }
        Command::TreeDiff { original, revised, values } => {
            let original = read_tree(original, &diagnostics)?;
            let revised = read_tree(revised, &diagnostics)?;
            let rendered = if *values {
                tree_value_diff(&original, &revised)
            } else {
                tree_diff(&original, &revised)
            };
            emit_diff(&rendered)
        }
        Command::Flatten { tree, values } => {
            let tree = read_tree(tree, &diagnostics)?;
            let mut stdout = io::stdout().lock();
            if *values {
                for leaf in flatten_values(&tree) {
                    writeln!(stdout, "{leaf}")?;
                }
            } else {
                for entry in flatten(&tree) {
                    writeln!(stdout, "{entry}")?;
                }
            }
            Ok(0)
        }
    }
}

/// Installs a stderr `fmt` subscriber whose filter mirrors the channel
/// levels, so only gated diagnostics reach the terminal.
fn init_tracing(config: &DiagnosticConfig) -> Result<()> {
    let mut filter = EnvFilter::new("off");
    for channel in Channel::ALL {
        let directive = format!("{}={}", channel.target(), config.level(channel));
        filter = filter.add_directive(
            directive.parse().with_context(|| format!("invalid filter directive {directive}"))?,
        );
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn emit_diff(rendered: &str) -> Result<i32> {
    if rendered.is_empty() {
        return Ok(0);
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(1)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
            Ok(buffer)
        }
    }
}

fn read_tree(path: &Path, diagnostics: &Diagnostics) -> Result<Tree> {
    let text = read_input(Some(path))?;
    let tree: Tree = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse tree JSON in {}", path.display()))?;
    diagnostics.log_validation(Payload::Data(&path));
    Ok(tree)
}
