use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::Config;
use crate::engine::Engine;
use crate::serial::Program;

#[derive(Parser)]
#[command(name = "phrasal")]
#[command(about = "Phrasal - procedural text from vocabulary queries", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Vocabulary file (overrides config file and env vars)
    #[arg(long, global = true)]
    pub vocabulary: Option<String>,

    /// Message language, e.g. en-US
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Seed for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a program (compiled or JSON) and print its output
    Run {
        /// Program file
        program: String,

        /// Number of runs (each with a fresh carrier state)
        #[arg(short = 'n', long = "count", default_value = "1")]
        count: usize,
    },

    /// Compile a JSON program tree into the binary format
    Compile {
        /// JSON program file
        input: String,

        /// Output path (default: input with a .pgm extension)
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },

    /// Print a program as JSON
    Dump {
        /// Program file
        program: String,
    },
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Handle one parsed command, writing user-facing output to `out`
fn execute(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Run { program, count } => {
            let config = Config::builder()
                .config_path(cli.config.map(PathBuf::from))
                .vocabulary(cli.vocabulary.map(PathBuf::from))
                .language(cli.language)
                .seed(cli.seed)
                .build()
                .context("Failed to load configuration")?;
            let engine = Engine::from_config(&config)?;
            let program = load_program(Path::new(&program))?;

            for i in 0..count {
                let seed = config.seed.map(|s| s.wrapping_add(i as u64));
                let output = engine.run(&program, seed);
                writeln!(out, "{output}")?;
            }
        }

        Commands::Compile { input, output } => {
            let input = PathBuf::from(input);
            let program = load_program(&input)?;
            let output = output
                .map(PathBuf::from)
                .unwrap_or_else(|| input.with_extension("pgm"));
            program
                .save_file(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            writeln!(out, "Compiled {} -> {}", input.display(), output.display())?;
        }

        Commands::Dump { program } => {
            let program = load_program(Path::new(&program))?;
            let json = serde_json::to_string_pretty(&program)?;
            writeln!(out, "{json}")?;
        }
    }

    Ok(())
}

/// Load a program from either the binary format or JSON
fn load_program(path: &Path) -> Result<Program> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if Program::is_compiled(&bytes) {
        debug!(path = %path.display(), "loading compiled program");
        return Program::from_bytes(&bytes)
            .with_context(|| format!("Failed to load compiled program {}", path.display()));
    }

    debug!(path = %path.display(), "loading JSON program");
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON program {}", path.display()))
}
