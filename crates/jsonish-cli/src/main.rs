//! `jsonish` CLI — format, check, and split lax JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Canonicalize a lax document (stdin → stdout)
//! echo '{ name: "Ada", scores: [95, 87,], }' | jsonish fmt
//!
//! # Format from file to file
//! jsonish fmt -i config.jsonc -o config.json
//!
//! # Validate without printing; errors carry the byte offset
//! jsonish check -i config.jsonc
//!
//! # Split a stream of documents into one canonical line each
//! jsonish multi -i stream.txt
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "jsonish",
    version,
    about = "Lenient JSON reader and canonical formatter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a lax document and print its canonical compact form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a document without printing it
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse a stream of documents and emit one canonical line per document
    Multi {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt { input, output } => {
            let text = read_input(input.as_deref())?;
            let value = jsonish_core::parse(&text).context("Failed to parse input")?;
            write_output(output.as_deref(), &value.dump())?;
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            jsonish_core::parse(&text).context("Failed to parse input")?;
        }
        Commands::Multi { input, output } => {
            let text = read_input(input.as_deref())?;
            let (values, error) = jsonish_core::parse_multi(&text);
            let mut lines = String::new();
            for value in &values {
                jsonish_core::dump_to(value, &mut lines);
                lines.push('\n');
            }
            // Documents parsed before a malformed one are still emitted.
            write_output(output.as_deref(), &lines)?;
            if let Some(error) = error {
                return Err(error).context("Stream ended with a malformed document");
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
