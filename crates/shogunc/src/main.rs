//! shogunc CLI
//!
//! Generates typed Go data-access code from SQL schema and query files.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use shogunc::inspect::{queries_json, schema_json};
use shogunc::{compile, generate, write, Config};

/// Typed Go data access from SQL.
#[derive(Parser)]
#[command(name = "shogunc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (shogunc.yml in the current directory if omitted).
    #[arg(short, long, env = "SHOGUNC_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the queries file and db.go.
    Generate {
        /// Print the generated code instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Compile everything without writing.
    Check,

    /// Print parsed inputs as JSON.
    Inspect {
        #[arg(value_enum)]
        target: InspectTarget,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InspectTarget {
    Schema,
    Queries,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::discover(std::env::current_dir()?)?,
    };
    let config = Config::load(&config_path)?;
    info!("Loaded config from {}", config_path.display());
    let sql = &config.sql;

    match cli.command {
        Commands::Generate { dry_run } => {
            let output = generate(sql)?;
            if dry_run {
                println!("// {}", output.queries_path.display());
                print!("{}", output.sources.queries);
                println!();
                println!("// {}", output.db_path.display());
                print!("{}", output.sources.db);
            } else {
                write(&output)?;
            }
        }

        Commands::Check => {
            let pipeline = compile(sql)?;
            pipeline.render(&sql.package, sql.driver)?;
            info!(
                "OK: {} declarations, {} queries",
                pipeline.registry().len(),
                pipeline.queries().len()
            );
        }

        Commands::Inspect { target } => {
            let json = match target {
                InspectTarget::Schema => schema_json(sql)?,
                InspectTarget::Queries => queries_json(sql)?,
            };
            println!("{json}");
        }
    }

    Ok(())
}
