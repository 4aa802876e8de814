mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use kinship_core::ConfigInput;
use kinship_eval::{CheckOptions, EvalError, FamilyGraph, TripleSet, check_graph};
use kinship_generate::{
    GenerationEngine, GenerationError, GenerationResult, OutputTarget, SerializationError, emit,
    write_json_atomic,
};
use logging::{LogFormat, init_logging};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    ConfigFile(#[from] toml::de::Error),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "kinship", version, about = "Synthetic family data generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
    /// Append logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a family population and write it as Turtle.
    Generate(GenerateArgs),
    /// Read a generated document back and check its invariants.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML file with generation settings; flags take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of founding couples [default: 10].
    #[arg(long, allow_negative_numbers = true)]
    initial_families: Option<i64>,
    /// Maximum children per family, drawn uniformly from 0..=N [default: 7].
    #[arg(long, allow_negative_numbers = true)]
    max_children: Option<i64>,
    /// Pristine generations grown before mixing [default: 4].
    #[arg(long, allow_negative_numbers = true)]
    pristine_generations: Option<i64>,
    /// Mixed families created after pristine growth [default: 10000].
    #[arg(long, allow_negative_numbers = true)]
    mixed_families: Option<i64>,
    /// Random seed [default: 2025].
    #[arg(long)]
    seed: Option<u64>,
    /// Pair sampling attempts per mixed family [default: 1000].
    #[arg(long, allow_negative_numbers = true)]
    max_pair_attempts: Option<i64>,
    /// Output file; standard output when omitted.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Write a JSON generation report to this path.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

impl GenerateArgs {
    fn config_input(&self) -> Result<ConfigInput, CliError> {
        let mut input = match &self.config {
            Some(path) => load_config_file(path)?,
            None => ConfigInput::default(),
        };
        if let Some(value) = self.initial_families {
            input.initial_families = value;
        }
        if let Some(value) = self.max_children {
            input.max_children = value;
        }
        if let Some(value) = self.pristine_generations {
            input.pristine_generations = value;
        }
        if let Some(value) = self.mixed_families {
            input.mixed_families = value;
        }
        if let Some(value) = self.seed {
            input.seed = value;
        }
        if let Some(value) = self.max_pair_attempts {
            input.max_pair_attempts = value;
        }
        Ok(input)
    }
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Document to check.
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// Flag families with more children than this.
    #[arg(long)]
    max_children: Option<u32>,
    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Check(args) => run_check(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let timer = Instant::now();
    let input = args.config_input()?;
    let engine = GenerationEngine::from_input(&input)?;
    tracing::info!(event = "run_started", seed = engine.config().seed());

    let GenerationResult {
        population,
        mut report,
    } = engine.run()?;

    let target = args.output.map(OutputTarget::File).unwrap_or_default();
    let bytes = emit(&population, &target)?;
    report.record_bytes_written(bytes);

    if let Some(path) = &args.report {
        write_json_atomic(path, &report)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        bytes_written = bytes,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let set = TripleSet::load(&args.input)?;
    let graph = FamilyGraph::from_triples(&set);
    let report = check_graph(
        &graph,
        &CheckOptions {
            max_children: args.max_children,
        },
    );

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", report.render())?;
    }
    stdout.flush()?;

    if !report.is_ok() {
        return Err(EvalError::Violations(report.errors.len()).into());
    }
    Ok(())
}

fn load_config_file(path: &Path) -> Result<ConfigInput, CliError> {
    let content = std::fs::read_to_string(path)?;
    let input: ConfigInput = toml::from_str(&content)?;
    tracing::debug!(event = "config_loaded", path = %path.display());
    Ok(input)
}
