//! Single-file and directory runs

use crate::args::Cli;
use jlex_analyzer::batch::{self, BatchConfig, BatchResults};
use jlex_analyzer::config::RuntimeConfig;
use jlex_analyzer::output::{
    render_analyzed, render_lexeme_dump, render_source, render_table_dump, render_token_dump,
    render_tokens_only, AnalysisReport, BatchFailure, BatchReport,
};
use jlex_analyzer::pipeline::{self, PipelineOptions, PipelineResult};
use jlex_analyzer::token_table::{TableLoadReport, TableLoader};
use jlex_analyzer::TokenKindTable;
use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Load the table named by `--tokens`, the runtime config, or the built-in one
pub fn load_table(cli: &Cli, config: &RuntimeConfig) -> CliResult<Arc<TokenKindTable>> {
    let loader = TableLoader::from_preferences(&config.table);
    let report: TableLoadReport = match &cli.tokens {
        Some(path) => loader.load_path(path)?,
        None => loader.load_configured(&config.table)?,
    };

    for rejected in &report.rejected {
        log::warn!("Skipped token table entry: {}", rejected);
    }
    log::info!(
        "Loaded {} token kinds ({} literals) from {}",
        report.table.len(),
        report.table.literal_count(),
        report.origin
    );

    Ok(Arc::new(report.table))
}

fn pipeline_options(cli: &Cli, config: &RuntimeConfig) -> PipelineOptions {
    PipelineOptions::from_config(config).with_lexemes(cli.show_lexemes || cli.json)
}

/// Text views in the order source, dumps, analyzed view, tokens-only view
pub fn write_text_views<W: Write>(
    out: &mut W,
    cli: &Cli,
    table: &TokenKindTable,
    result: &PipelineResult,
) -> CliResult<()> {
    let name = result.display_name.as_str();

    if !cli.no_source {
        write!(out, "{}", render_source(name, &result.source))?;
    }
    if cli.show_table {
        write!(out, "{}", render_table_dump(table))?;
    }
    if cli.show_lexemes {
        if let Some(lexemes) = &result.lexemes {
            write!(out, "{}", render_lexeme_dump(lexemes))?;
        }
    }
    if cli.show_tokens {
        write!(out, "{}", render_token_dump(&result.stream))?;
    }

    write!(out, "{}", render_analyzed(name, &result.stream))?;
    write!(out, "{}", render_tokens_only(name, &result.stream))?;
    Ok(())
}

pub fn run_single<W: Write>(
    out: &mut W,
    cli: &Cli,
    config: &RuntimeConfig,
    table: Arc<TokenKindTable>,
    path: &Path,
) -> CliResult<()> {
    let options = pipeline_options(cli, config);
    let result = pipeline::process_file_with_options(path, Arc::clone(&table), &options)?;

    if !result.ended_cleanly() {
        log::warn!(
            "{} ended inside {}; the rest of the file produced no tokens",
            result.display_name,
            result.final_state
        );
    }

    if cli.json {
        writeln!(out, "{}", AnalysisReport::from_result(&result).to_json_pretty()?)?;
    } else {
        write_text_views(out, cli, &table, &result)?;
    }
    Ok(())
}

fn batch_config(cli: &Cli, config: &RuntimeConfig) -> BatchConfig {
    let defaults = BatchConfig::default();
    BatchConfig {
        max_threads: cli.threads.unwrap_or(defaults.max_threads),
        recursive: !cli.no_recursive,
        max_files: cli.max_files,
        progress_reporting: !cli.quiet,
        fail_fast: cli.fail_fast,
        pipeline: pipeline_options(cli, config),
    }
}

fn batch_report(results: &BatchResults) -> BatchReport {
    BatchReport {
        generated_at: chrono::Utc::now(),
        files_analyzed: results.success_count(),
        files_failed: results.failure_count(),
        total_tokens: results.total_tokens(),
        duration_ms: results.processing_duration.as_secs_f64() * 1000.0,
        reports: results
            .successful_files
            .iter()
            .map(|(_, result)| AnalysisReport::from_result(result))
            .collect(),
        failures: results
            .failed_files
            .iter()
            .map(|(path, error)| BatchFailure {
                file: path.display().to_string(),
                code: error.error_code().as_str(),
                error: error.to_string(),
            })
            .collect(),
    }
}

/// Returns whether every file was analyzed
pub fn run_directory<W: Write>(
    out: &mut W,
    cli: &Cli,
    config: &RuntimeConfig,
    table: Arc<TokenKindTable>,
    dir: &Path,
) -> CliResult<bool> {
    let batch_config = batch_config(cli, config);
    let results = batch::process_directory(dir, Arc::clone(&table), &batch_config)?;

    if cli.json {
        writeln!(out, "{}", batch_report(&results).to_json_pretty()?)?;
    } else {
        for (_, result) in &results.successful_files {
            write_text_views(out, cli, &table, result)?;
            writeln!(out)?;
        }
        for (path, error) in &results.failed_files {
            log::error!("{}: {}", path.display(), error);
        }
        writeln!(out, "{}", results.summary())?;
    }

    Ok(results.failure_count() == 0)
}
