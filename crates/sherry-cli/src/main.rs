//! shsplit: split shell source into lexical nodes.
//!
//! Reads a file (or stdin) and prints the nodes as an indented tree, or as
//! JSON with `--json`.
//!
//! ```bash
//! shsplit script.sh
//! echo 'echo $((1 + 2))' | shsplit --json
//! RUST_LOG=sherry_lexer=trace shsplit script.sh
//! ```

mod pretty;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use clap::Parser;
use sherry_lexer::LexError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::pretty::TreePrinter;

#[derive(Debug, Parser)]
#[command(name = "shsplit", version, about = "Split shell source into lexical nodes")]
struct Cli {
    /// Shell source to read. Reads stdin when absent or `-`.
    file: Option<PathBuf>,

    /// Dump as JSON instead of an indented tree.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Respects RUST_LOG; stdout is reserved for the dump
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let (name, input) = read_input(cli.file.as_deref())?;
    tracing::info!(source = %name, bytes = input.len(), "read input");

    let nodes = match sherry_lexer::tokenize(&input) {
        Ok(nodes) => nodes,
        Err(err) => {
            report(&name, &input, &err);
            return Err(err).with_context(|| format!("failed to lex {name}"));
        }
    };
    tracing::info!(nodes = nodes.len(), "lexed input");

    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer(&mut out, &nodes).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        TreePrinter::new(&mut out)
            .print(&nodes)
            .context("failed to write tree")?;
    }
    out.flush()?;
    Ok(())
}

/// Returns a display name for the source and its bytes.
fn read_input(path: Option<&Path>) -> Result<(String, Vec<u8>)> {
    match path {
        Some(path) if path != Path::new("-") => {
            let input =
                std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), input))
        }
        _ => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("failed to read stdin")?;
            Ok(("<stdin>".to_string(), input))
        }
    }
}

/// Renders `err` against the source on stderr.
///
/// Skipped for input that is not UTF-8, where byte offsets would not line up
/// with the decoded text.
fn report(name: &str, input: &[u8], err: &LexError) {
    let Ok(text) = std::str::from_utf8(input) else {
        return;
    };
    let start = usize::from(err.pos()).min(text.len());
    let span = start..(start + 1).min(text.len());

    let result = Report::build(ReportKind::Error, (name, span.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(err.to_string())
        .with_label(Label::new((name, span)).with_message(label(err)))
        .finish()
        .eprint((name, Source::from(text)));
    if let Err(e) = result {
        tracing::warn!(error = %e, "failed to render diagnostic");
    }
}

fn label(err: &LexError) -> String {
    match err {
        LexError::Unexpected { found, .. } => format!("`{found}` is not valid here"),
        LexError::ExpectedIn { .. } => "expected `in` here".to_string(),
        LexError::Unsupported { what, .. } => format!("{what} starts here"),
        LexError::Unterminated { delimiter, .. } => format!("{delimiter} opened here"),
        LexError::TooDeep { limit, .. } => format!("level {} starts here", limit + 1),
        LexError::Internal { message, .. } => message.to_string(),
    }
}
