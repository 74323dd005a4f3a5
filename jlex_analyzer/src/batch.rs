//! Directory batch analysis of Java sources
//!
//! Files are discovered up front, sorted, and analyzed either in order on the
//! calling thread or split across `std::thread` workers. Every worker holds a
//! clone of the same `Arc<TokenKindTable>` and owns its own scan state.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::file_processor::JAVA_EXTENSION;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineOptions, PipelineResult};
use crate::token_table::TokenKindTable;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Clamped to `1..=MAX_WORKER_THREADS` when used
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    pub pipeline: PipelineOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .min(MAX_WORKER_THREADS),
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
            pipeline: PipelineOptions::default(),
        }
    }
}

impl BatchConfig {
    pub fn effective_threads(&self) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS)
    }
}

#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.success_count() as f64 / self.files_processed as f64
        }
    }

    pub fn total_tokens(&self) -> usize {
        self.successful_files
            .iter()
            .map(|(_, result)| result.token_count())
            .sum()
    }

    fn record(&mut self, file_path: PathBuf, outcome: Result<PipelineResult, PipelineError>) {
        self.files_processed += 1;
        match outcome {
            Ok(result) => self.successful_files.push((file_path, result)),
            Err(error) => self.failed_files.push((file_path, error)),
        }
    }

    fn sort_by_path(&mut self) {
        self.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch analysis completed: {} files processed, {} successful ({:.1}%), {} failed, {} tokens, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.total_tokens(),
            self.processing_duration.as_secs_f64()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No .java files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("I/O error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Worker thread failed: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::DirectoryNotFound { .. } => codes::batch::DIRECTORY_NOT_FOUND,
            BatchError::NoFilesFound { .. } => codes::batch::NO_FILES_FOUND,
            BatchError::TooManyFiles { .. } => codes::batch::TOO_MANY_FILES,
            BatchError::IoError { .. } => codes::file_processing::IO_ERROR,
            BatchError::ThreadError { .. } => codes::batch::WORKER_FAILURE,
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Find `.java` files under `dir_path`, sorted by path
pub fn discover_java_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        let error = BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        };
        crate::log_error!(error.error_code(), "Batch directory not found",
            "directory" => dir_path.display()
        );
        return Err(error);
    }

    let mut files = Vec::new();
    visit_directory(dir_path, config.recursive, &mut files)?;
    files.sort();

    if files.is_empty() {
        let error = BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        };
        crate::log_error!(error.error_code(), "No .java files found",
            "directory" => dir_path.display()
        );
        return Err(error);
    }

    if let Some(max_files) = config.max_files {
        if files.len() > max_files {
            crate::log_warning!("Reached maximum file limit",
                "files_found" => files.len(),
                "limit" => max_files
            );
            files.truncate(max_files);
        }
    }

    if files.len() > MAX_FILES_PER_BATCH {
        let error = BatchError::TooManyFiles {
            count: files.len(),
            max: MAX_FILES_PER_BATCH,
        };
        crate::log_error!(error.error_code(), "Too many files for one batch",
            "files_found" => files.len(),
            "limit" => MAX_FILES_PER_BATCH
        );
        return Err(error);
    }

    crate::log_debug!("File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

fn visit_directory(
    dir_path: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: format!("{}: {}", dir_path.display(), e),
    })?;

    for entry in entries {
        let path = entry
            .map_err(|e| BatchError::IoError {
                error: e.to_string(),
            })?
            .path();

        if path.is_dir() {
            if recursive {
                visit_directory(&path, recursive, files)?;
            }
        } else if is_java_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_java_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(JAVA_EXTENSION))
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

pub fn process_directory(
    dir_path: &Path,
    table: Arc<TokenKindTable>,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let files = discover_java_files(dir_path, config)?;
    let threads = config.effective_threads();

    crate::log_info!("Starting batch analysis",
        "directory" => dir_path.display(),
        "files" => files.len(),
        "threads" => threads
    );

    let mut results = if threads == 1 || files.len() == 1 {
        process_sequential(&files, table, config)
    } else {
        process_parallel(&files, table, config, threads)?
    };

    results.files_discovered = files.len();
    results.processing_duration = start_time.elapsed();
    results.sort_by_path();

    for (path, error) in &results.failed_files {
        crate::log_error!(codes::batch::FILE_FAILED, "File analysis failed",
            "file" => path.display(),
            "code" => error.error_code().as_str(),
            "error" => error
        );
    }

    crate::log_success!(codes::success::BATCH_COMPLETE, "Batch analysis completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(results)
}

fn process_sequential(
    files: &[PathBuf],
    table: Arc<TokenKindTable>,
    config: &BatchConfig,
) -> BatchResults {
    let mut results = BatchResults::new();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            crate::log_info!("Analyzing file",
                "index" => file_id + 1,
                "of" => files.len(),
                "file" => file_path.display()
            );
        }

        let outcome = pipeline::process_file_with_id(
            file_path,
            file_id,
            Arc::clone(&table),
            &config.pipeline,
        );
        let failed = outcome.is_err();
        results.record(file_path.clone(), outcome);

        if failed && config.fail_fast {
            crate::log_warning!("Fail-fast enabled, stopping batch");
            break;
        }
    }

    results
}

type Outcome = (PathBuf, Result<PipelineResult, PipelineError>);

/// Contiguous slices of `files`, one per worker. Workers return their
/// outcomes through the join handle.
fn process_parallel(
    files: &[PathBuf],
    table: Arc<TokenKindTable>,
    config: &BatchConfig,
    threads: usize,
) -> Result<BatchResults, BatchError> {
    let files_per_thread = files.len().div_ceil(threads);
    let mut handles = Vec::with_capacity(threads);

    for (worker, slice) in files.chunks(files_per_thread).enumerate() {
        let first_id = worker * files_per_thread;
        let worker_files = slice.to_vec();
        let worker_table = Arc::clone(&table);
        let options = config.pipeline.clone();
        let fail_fast = config.fail_fast;

        let handle = thread::Builder::new()
            .name(format!("jlex-worker-{}", worker))
            .spawn(move || {
                let mut outcomes: Vec<Outcome> = Vec::with_capacity(worker_files.len());
                for (offset, path) in worker_files.into_iter().enumerate() {
                    let outcome = pipeline::process_file_with_id(
                        &path,
                        first_id + offset,
                        Arc::clone(&worker_table),
                        &options,
                    );
                    let failed = outcome.is_err();
                    outcomes.push((path, outcome));
                    if failed && fail_fast {
                        break;
                    }
                }
                outcomes
            })
            .map_err(|e| BatchError::ThreadError {
                message: e.to_string(),
            })?;

        handles.push(handle);
    }

    let mut results = BatchResults::new();
    for handle in handles {
        let outcomes = handle.join().map_err(|_| {
            let error = BatchError::ThreadError {
                message: "worker panicked during analysis".to_string(),
            };
            crate::log_error!(error.error_code(), "Batch worker failed");
            error
        })?;

        for (path, outcome) in outcomes {
            results.record(path, outcome);
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_table::default_java_table;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn java_table() -> Arc<TokenKindTable> {
        Arc::new(default_java_table().expect("built-in table loads"))
    }

    fn quiet_config(threads: usize) -> BatchConfig {
        BatchConfig {
            max_threads: threads,
            progress_reporting: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_file_discovery() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("B.java"), "class B {}").unwrap();
        fs::write(dir.path().join("A.java"), "class A {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not java").unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg").join("C.java"), "class C {}").unwrap();

        let files = discover_java_files(dir.path(), &quiet_config(1)).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files[0].ends_with("A.java"));

        let flat = BatchConfig {
            recursive: false,
            ..quiet_config(1)
        };
        assert_eq!(discover_java_files(dir.path(), &flat).unwrap().len(), 2);
    }

    #[test]
    fn test_max_files_truncates() {
        let dir = tempdir().unwrap();
        for name in ["A.java", "B.java", "C.java"] {
            fs::write(dir.path().join(name), "int x;").unwrap();
        }
        let config = BatchConfig {
            max_files: Some(2),
            ..quiet_config(1)
        };
        assert_eq!(discover_java_files(dir.path(), &config).unwrap().len(), 2);
    }

    #[test]
    fn test_discovery_errors() {
        let dir = tempdir().unwrap();
        assert_matches!(
            discover_java_files(dir.path(), &quiet_config(1)),
            Err(BatchError::NoFilesFound { .. })
        );
        assert_matches!(
            discover_java_files(&dir.path().join("missing"), &quiet_config(1)),
            Err(BatchError::DirectoryNotFound { .. })
        );
    }

    #[test]
    fn test_is_java_file() {
        let dir = tempdir().unwrap();
        let java = dir.path().join("T.java");
        let txt = dir.path().join("T.txt");
        fs::write(&java, "").unwrap();
        fs::write(&txt, "").unwrap();

        assert!(is_java_file(&java));
        assert!(!is_java_file(&txt));
        assert!(!is_java_file(dir.path()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempdir().unwrap();
        for i in 0..7 {
            fs::write(
                dir.path().join(format!("F{}.java", i)),
                format!("int v{} = {};\n", i, i),
            )
            .unwrap();
        }

        let table = java_table();
        let sequential = process_directory(dir.path(), Arc::clone(&table), &quiet_config(1)).unwrap();
        let parallel = process_directory(dir.path(), Arc::clone(&table), &quiet_config(3)).unwrap();

        assert_eq!(sequential.success_count(), 7);
        assert_eq!(parallel.success_count(), 7);
        assert_eq!(parallel.files_discovered, 7);
        for ((p1, r1), (p2, r2)) in sequential
            .successful_files
            .iter()
            .zip(parallel.successful_files.iter())
        {
            assert_eq!(p1, p2);
            assert_eq!(r1.stream.all_tokens(), r2.stream.all_tokens());
        }
        assert_eq!(Arc::strong_count(&table), 1);
    }

    #[test]
    fn test_fail_fast_sequential() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("A.java"), [0xff, 0xfe]).unwrap();
        fs::write(dir.path().join("B.java"), "int b;").unwrap();

        let config = BatchConfig {
            fail_fast: true,
            ..quiet_config(1)
        };
        let results = process_directory(dir.path(), java_table(), &config).unwrap();
        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.files_processed, 1);
        assert_matches!(results.failed_files[0].1, PipelineError::FileProcessing(_));
    }

    #[test]
    fn test_effective_threads_is_clamped() {
        assert_eq!(quiet_config(0).effective_threads(), 1);
        assert_eq!(
            quiet_config(MAX_WORKER_THREADS + 5).effective_threads(),
            MAX_WORKER_THREADS
        );
    }

    #[test]
    fn test_batch_results_summary() {
        let results = BatchResults::new();
        assert_eq!(results.success_rate(), 0.0);
        assert!(results.summary().contains("0 files processed"));
    }
}
