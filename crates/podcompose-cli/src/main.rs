mod commands;

use clap::{Parser, Subcommand};
use commands::{Context, EXIT_FAILURE, EXIT_RUNTIME_ERROR, EXIT_SPEC_ERROR};
use podcompose_core::Config;
use podcompose_runtime::Rkt;
use podcompose_schema::RenderOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "podcompose",
    version,
    about = "Compose rkt pods from a YAML description"
)]
struct Cli {
    /// Config file [default: ~/.podcompose.yaml].
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compose file describing the pod.
    #[arg(short = 'f', long, env = "PODCOMPOSE_FILE", global = true)]
    file: Option<PathBuf>,

    /// Where the generated pod manifest is written.
    #[arg(short = 'm', long, env = "PODCOMPOSE_MANIFEST", global = true)]
    manifest: Option<PathBuf>,

    /// rkt binary used to fetch images and run the pod.
    #[arg(long, env = "PODCOMPOSE_RKT", global = true)]
    rkt: Option<PathBuf>,

    /// Enable debug logging and run rkt with --debug.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    /// Fail when an image name is not a valid identifier instead of
    /// omitting it from the manifest.
    #[arg(long, default_value_t = false, global = true)]
    strict_image_names: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch images and generate the pod manifest.
    Prepare {
        /// Regenerate even if the manifest is newer than the compose file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Prepare if needed, then run the pod in the foreground.
    Run {
        /// Attach the terminal to the pod (single app only).
        #[arg(short, long, default_value_t = false)]
        interactive: bool,
    },
    /// Prepare if needed, then run the pod as a transient systemd unit.
    Start,
    /// Stop the pod's systemd unit.
    Stop,
    /// Prepare if needed, then restart the pod's systemd unit.
    Restart,
    /// Show the status of the pod's systemd unit.
    Status,
    /// Show the journal of the last pod run from this directory
    /// (use -- to pass arguments to journalctl).
    Logs {
        #[arg(last = true)]
        args: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let verbose = cli.verbose || config.verbose;

    let default_level = if cli.trace {
        "trace"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PODCOMPOSE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = Context {
        compose: cli.file.unwrap_or(config.file),
        manifest: cli.manifest.unwrap_or(config.manifest),
        rkt: Rkt::new(cli.rkt.unwrap_or(config.rkt)),
        verbose,
        render: RenderOptions {
            strict_image_names: cli.strict_image_names || config.strict_image_names,
        },
    };
    debug!(
        "compose file {}, manifest {}, rkt {}",
        ctx.compose.display(),
        ctx.manifest.display(),
        ctx.rkt.binary().display()
    );

    let result = match cli.command {
        Commands::Prepare { force } => commands::prepare::run(&ctx, force),
        Commands::Run { interactive } => commands::run::run(&ctx, interactive),
        Commands::Start => commands::start::run(&ctx),
        Commands::Stop => commands::stop::run(&ctx),
        Commands::Restart => commands::restart::run(&ctx),
        Commands::Status => commands::status::run(&ctx),
        Commands::Logs { args } => commands::logs::run(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("compose error:") || msg.starts_with("manifest error:")
            {
                EXIT_SPEC_ERROR
            } else if msg.starts_with("runtime error:") {
                EXIT_RUNTIME_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
