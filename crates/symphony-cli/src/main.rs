// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Symphony compiler command-line interface.
//!
//! This is the main entry point for the `symphony` command.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use miette::Result;

mod commands;
mod diagnostic;

/// Symphony: compile textual music notation to MIDI
#[derive(Debug, Parser)]
#[command(name = "symphony")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a Symphony source file to a MIDI file
    Build {
        /// Source file to compile
        path: Utf8PathBuf,

        /// Output path (default: the source path with a .mid extension)
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Check a source file for errors without writing output
    Check {
        /// Source file to check
        path: Utf8PathBuf,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    // Log filtering via RUST_LOG, quiet by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build { path, output } => commands::build(&path, output.as_deref()),
        Command::Check { path } => commands::check(&path),
    }
}
