use clap::{ArgAction, Parser};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub const FILE_PROMPT: &str =
    "What is the name of the Java source code file you would like to test?";

#[derive(Debug, Parser)]
#[command(
    name = "jlex",
    version,
    about = "Table-driven lexical analyzer for Java source files",
    after_help = "The program asks for a file name when no path is given."
)]
pub struct Cli {
    /// Java source file or directory of sources
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Java source file to analyze
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "input")]
    pub file: Option<PathBuf>,

    /// Token-kind table to use instead of the built-in Java table
    #[arg(long = "tokens", value_name = "JSON")]
    pub tokens: Option<PathBuf>,

    /// Runtime preferences file (TOML)
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Print a JSON report instead of the text views
    #[arg(long)]
    pub json: bool,

    /// Dump the extracted lexemes
    #[arg(long)]
    pub show_lexemes: bool,

    /// Dump the extracted tokens
    #[arg(long)]
    pub show_tokens: bool,

    /// Dump the token-kind table
    #[arg(long)]
    pub show_table: bool,

    /// Skip printing the raw source
    #[arg(long)]
    pub no_source: bool,

    /// Worker threads for directory mode
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Stop a directory run at the first failing file
    #[arg(long)]
    pub fail_fast: bool,

    /// Only analyze files directly inside the directory
    #[arg(long)]
    pub no_recursive: bool,

    /// Analyze at most N files in directory mode
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Only print warnings and errors from the CLI itself
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More CLI log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Path given by `--file` or positionally
    pub fn target(&self) -> Option<&Path> {
        self.file.as_deref().or(self.input.as_deref())
    }

    /// Default filter for `env_logger` when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Ask for a file name on `output` and read one line from `input`
pub fn prompt_for_file<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<PathBuf> {
    write!(output, "{}", FILE_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();
    if name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no file name given",
        ));
    }
    Ok(PathBuf::from(name))
}
