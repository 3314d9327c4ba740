use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::control;
use migclash::{ComponentSet, DEFAULT_EXTENSION, Reporter, ScanConfig, ScanResult};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "migclash")]
#[command(version)]
#[command(about = "Detect duplicate migration numbers across project components")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the current directory for duplicate migration numbers (default)
    Check(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    #[arg(long, help = "Output results as JSON")]
    json: bool,

    /// Migration file extension; a leading dot is optional
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Skip directories excluded by .gitignore and .ignore files
    #[arg(long)]
    respect_gitignore: bool,

    /// When to colorize the report
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Print scan diagnostics to stderr (-vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            json: false,
            extension: DEFAULT_EXTENSION.to_string(),
            respect_gitignore: false,
            color: ColorChoice::Auto,
            verbose: 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn main() {
    let cli = Cli::parse();

    let args = match cli.command {
        Some(Commands::Check(args)) => args,
        None => CheckArgs::default(),
    };

    init_tracing(args.verbose);

    match args.color {
        ColorChoice::Always => control::set_override(true),
        ColorChoice::Never => control::set_override(false),
        ColorChoice::Auto => {}
    }

    match run_check(&args) {
        Ok(true) => std::process::exit(1),
        Ok(false) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Scan the working directory and print the outcome.
///
/// Returns true if duplicates were found (caller should exit with code 1).
fn run_check(args: &CheckArgs) -> ScanResult<bool> {
    let config = ScanConfig {
        extension: args.extension.clone(),
        respect_gitignore: args.respect_gitignore,
    };

    let components = ComponentSet::discover(&config)?;
    tracing::debug!(components = components.len(), "scan complete");
    let report = components.check_conflicts();

    let stdout = std::io::stdout().lock();
    let mut reporter = if args.color == ColorChoice::Never {
        Reporter::plain(stdout)
    } else {
        Reporter::new(stdout)
    };

    if args.json {
        reporter.print_json(&report)?;
    } else {
        reporter.print_outcome(&report)?;
    }

    Ok(report.has_conflicts)
}

/// Diagnostics go to stderr; RUST_LOG takes precedence over -v
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "migclash=debug",
        _ => "migclash=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
