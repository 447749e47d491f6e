use clap::builder::PossibleValuesParser;
use clap::Parser;
use radius_msgauth::LocateStrategy;
use radius_msgauth_cli::prompt::{print_capture_guidance, prompt_line};
use radius_msgauth_cli::{
    render_json, render_text, run_check, BufferSource, CheckRequest, CliError, Config,
    InputFormat, LOG_LEVELS,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_MATCH: i32 = 0;
const EXIT_MISMATCH: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// Verify the Message-Authenticator (RFC 2869) of a captured RADIUS packet
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "radius_msgauth")]
struct Cli {
    /// File holding only the RADIUS layer of the packet (prompted if omitted)
    #[arg(value_name = "INPUT", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// Shared secret (prompted if omitted)
    #[arg(short, long, env = "RADIUS_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Packet as a hex stream instead of a file
    #[arg(long, value_name = "HEX")]
    hex: Option<String>,

    /// Input file encoding: auto, binary or hex
    #[arg(short, long)]
    format: Option<InputFormat>,

    /// Attribute search: walk (attribute list) or scan (first 50 12 pair)
    #[arg(long)]
    strategy: Option<LocateStrategy>,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_parser = PossibleValuesParser::new(LOG_LEVELS))]
    log_level: Option<String>,

    /// Write an example configuration file and exit
    #[arg(long, value_name = "PATH")]
    write_example_config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(ref path) = cli.write_example_config {
        match Config::example().to_file(path) {
            Ok(()) => {
                println!("Example configuration written to {}", path.display());
                process::exit(EXIT_MATCH);
            }
            Err(e) => {
                eprintln!("Error creating example config: {}", e);
                process::exit(EXIT_ERROR);
            }
        }
    }

    let config = match cli.config {
        Some(ref path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Could not load config file {}: {}", path.display(), e);
                process::exit(EXIT_ERROR);
            }
        },
        None => Config::default(),
    };

    // Logs go to stderr so the report on stdout stays parseable
    let log_level = config.effective_log_level(cli.log_level.as_deref());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli, &config) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error working with the packet: {}", e);
            process::exit(EXIT_ERROR);
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<i32, CliError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let source = match (&cli.hex, &cli.input) {
        (Some(text), _) => BufferSource::Hex(text.clone()),
        (None, Some(path)) => BufferSource::File(path.clone()),
        (None, None) => {
            print_capture_guidance(&mut stdout).map_err(CliError::Output)?;
            let path = prompt_line(&mut input, &mut stdout, "Path to byte export file:")
                .map_err(CliError::Prompt)?;
            BufferSource::File(PathBuf::from(path))
        }
    };

    let shared_secret = match cli.secret.as_ref().or(config.shared_secret.as_ref()) {
        Some(secret) => secret.clone(),
        None => prompt_line(&mut input, &mut stdout, "Shared Secret:").map_err(CliError::Prompt)?,
    };

    let request = CheckRequest {
        source,
        format: cli.format.unwrap_or(config.input_format),
        shared_secret,
        strategy: cli.strategy.unwrap_or(config.locate_strategy),
    };
    debug!(format = %request.format, strategy = %request.strategy, "Running check");

    let outcome = run_check(&request)?;

    if cli.json || config.json_output {
        render_json(&outcome, &mut stdout)?;
    } else {
        render_text(&outcome, &mut stdout).map_err(CliError::Output)?;
    }
    stdout.flush().map_err(CliError::Output)?;

    Ok(if outcome.result.matches {
        EXIT_MATCH
    } else {
        EXIT_MISMATCH
    })
}
