use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "pmodel")]
#[command(version, about = "Policy model inspection CLI", long_about = None)]
struct Cli {
    /// Log model loading at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a model file and print its sections
    Check {
        /// Path to the model file (.conf, .ini, .toml, .yaml)
        file: String,
    },
    /// Report whether the model's rules can use set storage
    Analyze {
        /// Path to the model file (.conf, .ini, .toml, .yaml)
        file: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Ignore error if already initialized
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { file } => commands::check::run(&file)?,
        Commands::Analyze { file } => commands::analyze::run(&file)?,
    }

    Ok(())
}
