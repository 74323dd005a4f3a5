//! # jlex
//!
//! Analyze one Java source file, or every `.java` file in a directory,
//! against a token-kind table and print the analyzed and tokens-only views.

mod args;
mod commands;

use args::{prompt_for_file, Cli};
use clap::Parser;
use jlex_analyzer::config::RuntimeConfig;
use jlex_analyzer::{logging, pipeline};
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::from_toml_file(path)?,
        None => RuntimeConfig::default(),
    };

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;

    let target = match cli.target() {
        Some(path) => path.to_path_buf(),
        None => prompt_for_file(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let table = commands::load_table(&cli, &config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if target.is_dir() {
        let all_ok = commands::run_directory(&mut out, &cli, &config, table, &target)?;
        out.flush()?;
        if !all_ok {
            std::process::exit(1);
        }
    } else {
        if let Err(e) = commands::run_single(&mut out, &cli, &config, table, &target) {
            out.flush()?;
            log::error!("{}", e);
            eprintln!("An error occurred while analyzing {}: {}", target.display(), e);
            std::process::exit(1);
        }
        out.flush()?;
    }

    Ok(())
}
