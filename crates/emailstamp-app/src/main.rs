// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Email Stamp — verifiable HTML email stamps.
//
// Entry point. Initialises logging, resolves configuration, generates the
// stamp, and maps failures to distinct exit codes.

mod cli;
mod services;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use emailstamp_core::error::Result;
use emailstamp_core::human_errors::humanize_error;
use emailstamp_document::{assemble, write_document};

use cli::{Cli, OutputTarget};

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the summary or the HTML itself.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "stamp generation failed");
            let human = humanize_error(&err);
            eprintln!("Error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::from(human.exit_code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = services::config_dir::resolve(cli.config.as_deref())?;
    let request = cli.into_request(config)?;

    let document = assemble(&request.message, &request.options)?;

    match &request.output {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.html.as_bytes())?;
            stdout.flush()?;
            eprintln!("✓ SHA256 Hash: {}", document.digest);
        }
        OutputTarget::File(path) => {
            write_document(&document.html, path)?;
            println!();
            println!("✓ Email stamp generated successfully!");
            println!("✓ SHA256 Hash: {}", document.digest);
            println!("✓ Output file: {}", path.display());
            println!();
        }
    }

    tracing::info!(digest = %document.digest, "done");
    Ok(())
}
