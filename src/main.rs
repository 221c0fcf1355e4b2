//! Flowtrace CLI Entry Point
//!
//! Loads a scenario file, prints the registry report, and optionally
//! writes report and snapshot files.
//!
//! # Usage
//!
//! ```bash
//! # Load a scenario and print the report
//! flowtrace scenario.yaml
//!
//! # Also write the report to a file
//! flowtrace scenario.yaml --report-out overview.txt
//!
//! # Save a JSON snapshot of the registry
//! flowtrace scenario.yaml --snapshot registry.snapshot.json
//!
//! # Snapshot to the default location (.flowtrace/{name}.snapshot.json)
//! flowtrace scenario.yaml --snapshot-default
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use log::{error, info};

use flowtrace::registry::parser::load_scenario;
use flowtrace::registry::snapshot::{write_overview, Snapshot};
use flowtrace::report;
use flowtrace::{APP_NAME, VERSION};

/// Default scenario file used when none is specified.
const DEFAULT_SCENARIO: &str = "scenario.yaml";

/// Command-line configuration parsed from arguments.
#[derive(Debug)]
struct Config {
    scenario_path: String,
    report_out: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    snapshot_default: bool,
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scenario_path: DEFAULT_SCENARIO.to_string(),
            report_out: None,
            snapshot_path: None,
            snapshot_default: false,
            verbose: false,
        }
    }
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME.bold(), VERSION);
    println!("Workflow Telemetry Registry");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: flowtrace [OPTIONS] <SCENARIO_FILE>");
    println!();
    println!("Arguments:");
    println!("  <SCENARIO_FILE>      Path to scenario YAML file");
    println!();
    println!("Options:");
    println!("  --report-out PATH    Write the rendered report to PATH");
    println!("  --snapshot PATH      Save a JSON snapshot of the registry to PATH");
    println!("  --snapshot-default   Save a snapshot to .flowtrace/{{name}}.snapshot.json");
    println!("  --verbose            Enable debug logging");
    println!("  --help               Show this help message");
    println!("  --version            Show version information");
    println!();
    println!("Examples:");
    println!("  flowtrace scenario.yaml");
    println!("  flowtrace scenario.yaml --report-out overview.txt");
    println!("  flowtrace scenario.yaml --snapshot run1.snapshot.json --verbose");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut positional_index = 0;
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--snapshot-default" => {
                config.snapshot_default = true;
            }
            "--report-out" => {
                i += 1;
                if i >= args.len() {
                    return Err("--report-out requires a path argument".to_string());
                }
                config.report_out = Some(PathBuf::from(&args[i]));
            }
            "--snapshot" => {
                i += 1;
                if i >= args.len() {
                    return Err("--snapshot requires a path argument".to_string());
                }
                config.snapshot_path = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                // Positional argument
                match positional_index {
                    0 => config.scenario_path = arg.clone(),
                    _ => return Err(format!("Unexpected argument: {}", arg)),
                }
                positional_index += 1;
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("{} {}", "Error:".red().bold(), e);
        eprintln!();
        print_usage();
        e
    })?;

    // Setup logging
    setup_logging(config.verbose);

    // Print banner
    print_banner();

    // Load scenario
    info!("Loading scenario: {}", config.scenario_path);
    let registry = load_scenario(&config.scenario_path).map_err(|e| {
        error!("Failed to load scenario: {}", e);
        format!(
            "Could not load scenario from '{}': {}",
            config.scenario_path, e
        )
    })?;

    info!(
        "Registry '{}' ready: {} workflows",
        registry.name,
        registry.len()
    );

    // Print the report
    println!("{}", report::render(&registry));

    // Write optional report file
    if let Some(ref path) = config.report_out {
        write_overview(&registry, path)?;
    }

    // Save optional snapshot
    if config.snapshot_path.is_some() || config.snapshot_default {
        let snapshot = Snapshot::capture(&registry);
        let written = snapshot.save(config.snapshot_path.as_deref())?;
        println!("Snapshot saved: {}", written.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
