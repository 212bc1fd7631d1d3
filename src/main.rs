use clap::{Parser, Subcommand};
use iconcrop::config::{self, JobConfig};
use iconcrop::output;
use iconcrop::pipeline::{self, PipelineOptions};
use iconcrop::request::{OutputRequest, parse_requests};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Where the job comes from when not given on the command line.
#[derive(clap::Args, Clone)]
struct JobArgs {
    /// Job file listing the input and outputs (see `iconcrop gen-config`)
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "iconcrop")]
#[command(about = "Trim a source image's border and write PWA icons and favicons")]
#[command(long_about = "\
Trim a source image's border and write PWA icons and favicons

Every run trims a fixed 50px border from all four edges of the source, then
writes Lanczos3 resizes of what remains:

  large  512x512   pwa-512x512.png, favicon.png, favicon.ico, ...
  small  192x192   pwa-192x192.png

Outputs are written as [large:|small:]PATH. Without a prefix, a filename
containing \"192\" gets the small variant and every other file the large one.
The extension picks the format: .png, .ico, .jpg/.jpeg, .webp.

Example:

  iconcrop process logo.png public/pwa-512x512.png public/pwa-192x192.png \\
      public/favicon.png public/favicon.ico small:public/apple-touch-icon.png")]
#[command(version)]
struct Cli {
    /// Log pipeline diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop, resize and write every output
    Process {
        /// Source image
        input: Option<PathBuf>,

        /// Outputs as [large:|small:]PATH
        outputs: Vec<String>,

        #[command(flatten)]
        job: JobArgs,

        /// Stop at the first output that fails to write
        #[arg(long)]
        fail_fast: bool,

        /// Print a JSON report instead of progress lines
        #[arg(long)]
        json: bool,
    },
    /// Decode the source and check the crop without writing anything
    Check {
        /// Source image
        input: Option<PathBuf>,

        #[command(flatten)]
        job: JobArgs,
    },
    /// Print a stock iconcrop.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Process {
            input,
            outputs,
            job,
            fail_fast,
            json,
        } => {
            let job_config = load_job(job.config.as_deref())?;
            let input = resolve_input(input, &job_config)?;
            let requests = resolve_requests(&outputs, &job_config)?;
            let options = PipelineOptions {
                fail_fast: fail_fast || job_config.fail_fast,
            };

            if json {
                let report = pipeline::process(&input, &requests, options, None)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
                // stdout carries only the report
                eprintln!("{}", output::COMPLETION_MESSAGE);
                return Ok(());
            }

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = pipeline::process(&input, &requests, options, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            result?;
        }
        Command::Check { input, job } => {
            let job_config = load_job(job.config.as_deref())?;
            let input = resolve_input(input, &job_config)?;
            let report = pipeline::check(&input)?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "iconcrop=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_job(path: Option<&Path>) -> Result<JobConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => config::load_config(p)
            .map_err(|e| format!("config error in {}: {e}", p.display()).into()),
        None => Ok(JobConfig::default()),
    }
}

/// The command line wins over the job file.
fn resolve_input(
    cli_input: Option<PathBuf>,
    job: &JobConfig,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    cli_input
        .or_else(|| job.input.clone())
        .ok_or_else(|| "no input image given (pass INPUT or set `input` in --config)".into())
}

fn resolve_requests(
    cli_outputs: &[String],
    job: &JobConfig,
) -> Result<Vec<OutputRequest>, Box<dyn std::error::Error>> {
    let requests = if cli_outputs.is_empty() {
        job.requests()
    } else {
        parse_requests(cli_outputs)?
    };
    if requests.is_empty() {
        return Err("no outputs given (pass OUTPUTS or add [[outputs]] to --config)".into());
    }
    Ok(requests)
}
