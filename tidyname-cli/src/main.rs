use anyhow::Context;
use clap::Parser;
use std::io;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use tidyname_core::interrupt::prompt_active;
use tidyname_core::{should_use_color, Config, OutputFormatter, VersionResult};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod apply;
mod cli;
mod history;
mod preview;
mod prompt;
mod undo;

use cli::{Cli, Commands, OutputFormat};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

fn main() {
    // Ctrl-C at a prompt leaves immediately; during a batch the current
    // renames finish and history is saved before exiting
    if let Err(e) = ctrlc::set_handler(|| {
        if prompt_active() {
            eprintln!();
            process::exit(130);
        }
        eprintln!("\nReceived SIGINT. Finishing the current batch...");
        INTERRUPTED.store(true, Ordering::SeqCst);
    }) {
        eprintln!("Warning: failed to set SIGINT handler: {e}");
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        if let Err(e) = std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
        {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    };
    tracing::debug!(?config, "Loaded configuration");

    let use_color = should_use_color(if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    });

    let result = match cli.command {
        Commands::Preview {
            files,
            rules,
            output,
        } => preview::handle_preview(&files, &rules.resolve(&config.rules), output, use_color),

        Commands::Apply {
            files,
            rules,
            force_with_conflicts,
            output,
            quiet,
        } => apply::handle_apply(
            &files,
            &rules.resolve(&config.rules),
            output,
            &apply::ApplyOptions {
                force_with_conflicts,
                yes: cli.yes,
                quiet,
                use_color,
            },
        ),

        Commands::Undo { output } => undo::handle_undo(output, cli.yes, use_color),

        Commands::History { limit, output } => history::handle_history(limit, output, use_color),

        Commands::Version { output } => Ok(handle_version(output)),
    };

    match result {
        Ok(_) if INTERRUPTED.load(Ordering::SeqCst) => process::exit(130),
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");

            let message = e.to_string();
            let exit_code = if message.contains("conflict") {
                1 // Conflicts
            } else if message.contains("invalid") || message.contains("not found") {
                2 // Invalid input
            } else {
                3 // Internal error
            };

            process::exit(exit_code);
        },
    }
}

/// Log to stderr, filtered by `TIDYNAME_LOG` when set
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("TIDYNAME_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn handle_version(output: OutputFormat) -> i32 {
    let result = VersionResult {
        name: "tidyname".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    println!("{}", result.format(output.into(), false));
    0
}
