//! Treebuf demo - replays an edit script against a tree-backed text buffer.
//!
//! # Usage
//!
//! ```bash
//! treebuf
//! treebuf 'Hello\nWorld' --lines
//! treebuf --file notes.txt --script edits.txt --verify
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use treebuf::buffer::{BufferResult, TextBuffer};
use treebuf::script::Script;

const DEFAULT_TEXT: &str = "Hello\nWorld";

/// Replay scripted edits against an order-statistic tree text buffer
#[derive(Parser, Debug)]
#[command(name = "treebuf", version, about, long_about = None)]
struct Cli {
    /// Seed text; `\n` is expanded to a newline
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Read the seed text from a file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Edit script to replay (defaults to a built-in demo script)
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Print a start/length table of every line
    #[arg(long)]
    lines: bool,

    /// Check tree invariants after every step
    #[arg(long)]
    verify: bool,

    /// Rebuild the tree balanced before printing the result
    #[arg(long)]
    rebalance: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Read the buffer back one index at a time.
fn render(buffer: &TextBuffer) -> BufferResult<String> {
    (0..buffer.size()).map(|i| buffer.at(i)).collect()
}

fn print_state(label: &str, buffer: &TextBuffer) -> Result<()> {
    println!("{label}:");
    println!("{}", render(buffer)?);
    println!("Lines: {}, Size: {}", buffer.lines(), buffer.size());
    Ok(())
}

fn print_line_table(buffer: &TextBuffer) -> Result<()> {
    println!("{:>6} {:>8} {:>8}", "line", "start", "length");
    for line in 0..buffer.lines() {
        println!(
            "{line:>6} {:>8} {:>8}",
            buffer.line_start(line)?,
            buffer.line_length(line)?
        );
    }
    Ok(())
}

fn load_seed(cli: &Cli) -> Result<String> {
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()));
    }
    Ok(cli
        .text
        .as_deref()
        .map_or_else(|| DEFAULT_TEXT.to_string(), |t| t.replace("\\n", "\n")))
}

fn load_script(path: Option<&Path>) -> Result<Script> {
    let Some(path) = path else {
        return Ok(Script::demo());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    content
        .parse()
        .with_context(|| format!("Invalid script {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();

    let seed = load_seed(&cli)?;
    let script = load_script(cli.script.as_deref())?;
    info!(steps = script.steps.len(), "loaded script");

    let mut buffer = TextBuffer::new(&seed);
    print_state("Initial text", &buffer)?;

    for (n, step) in script.steps.iter().enumerate() {
        debug!(%step, "applying");
        step.apply(&mut buffer)
            .with_context(|| format!("Step {} ({step}) failed", n + 1))?;
        if cli.verify {
            buffer
                .validate()
                .with_context(|| format!("Tree invariant broken after step {} ({step})", n + 1))?;
        }
    }

    if cli.rebalance {
        buffer.rebalance();
    }

    println!();
    print_state("Modified text", &buffer)?;
    debug!(height = buffer.height(), "final tree");

    if cli.lines {
        println!();
        print_line_table(&buffer)?;
    }
    Ok(())
}
